use crate::convention::Convention;
use crate::generator::GenerationRequest;
use crate::llm::prompts;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn system_prompt(convention: &Convention) -> String {
    format!(
        "{intro}{conventions}\n{closing}",
        intro = prompts::SYSTEM_INSTRUCTIONS,
        conventions = convention.instruction(),
        closing = prompts::SYSTEM_CLOSING
    )
}

/// Build the prompt asking for four fresh suggestions for `req`.
pub fn commit_suggestions_prompt(req: &GenerationRequest) -> PromptPair {
    let system = system_prompt(&req.convention);

    let user = format!(
        "Generate new 4 commit messages for the branch '{branch}', \
         that are not duplicates of the previous suggestions: {last_suggest}, \
         with the following last commits history (if exist):\n{history}\n\
         Identify the 1-2 main changes in the diff and phrase the messages around them.\n\
         Separate them with new lines. Don't add any extra text.\n\
         For the following code changes:\n{diff}\n",
        branch = req.branch_name,
        last_suggest = req.last_suggest,
        history = req.last_history,
        diff = req.diff
    );

    PromptPair { system, user }
}
