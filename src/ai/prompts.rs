//! Prompt templates for AI generation

use crate::core::branch_type::BranchType;
use crate::core::generator::GenerationRequest;

/// Generate the prompt for branch name generation
pub fn branch_name_prompt(request: &GenerationRequest) -> String {
    let branch_type = &request.branch_type;
    let description = single_line(&request.description);
    let work_item = request.work_item_id.as_deref().map(single_line);

    let conventions = branch_type_conventions();
    let include_rule = match &work_item {
        Some(id) => format!("Include the work item ID \"{id}\" in the branch name. "),
        None => String::new(),
    };
    let pattern = match &work_item {
        Some(id) => format!("{branch_type}/{}-descriptive-name", id.to_lowercase()),
        None => format!("{branch_type}/descriptive-name"),
    };
    let work_item_line = match &work_item {
        Some(id) => format!("\nWork Item ID: {id}"),
        None => String::new(),
    };

    format!(
        r#"You are a Git branch naming expert following Git Flow conventions.

Git Flow Branch Types:
{conventions}

Requirements:
1. Use lowercase letters and numbers only
2. Use hyphens (-) to separate words, NO underscores or spaces
3. Keep it concise (2-5 words max after the work item ID)
4. Be descriptive but brief
5. {include_rule}Follow pattern: {pattern}

Task Description: "{description}"
Branch Type: {branch_type}{work_item_line}

Generate a single, perfect Git Flow branch name following the format above. Then provide a brief explanation (1-2 sentences) of why this name works well.

Format your response EXACTLY as:
BRANCH: [branch-name]
EXPLANATION: [explanation]"#
    )
}

/// One bullet per registered branch type, with its example names
fn branch_type_conventions() -> String {
    BranchType::all()
        .iter()
        .map(|t| {
            let examples = t
                .examples()
                .iter()
                .map(|ex| format!("{t}/{ex}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {t}/: {} ({examples})", t.description())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flatten user text onto one line so it cannot start a fake answer line
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
