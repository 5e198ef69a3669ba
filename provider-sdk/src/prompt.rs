//! Prompt template rendering
//!
//! The template is a fixed contract: the upstream model is instructed to
//! answer using exactly the labeled sections below, in order, with no
//! additional commentary, so downstream consumers can rely on the layout
//! for display formatting. Rendering is pure and total; the code is
//! embedded verbatim at the end and never truncated here (truncation is
//! an explicit invoker option).

/// Render the instructional template around the submitted code.
pub fn build_prompt(code: &str) -> String {
    format!(
        "\nYour job is to analyze the following code and return the answer ONLY in this structure:\n\
         \nSummary:\n(A single clean sentence describing what this code does.)\n\
         \nBreakdown:\n- Step 1\n- Step 2\n- Step 3\n\
         \nOutput:\n(Actual output OR \"No output\")\n\
         \nSuggestions:\n- Suggestion 1\n- Suggestion 2\n\
         \nCode:\n{}\n",
        code
    )
}
