//! Prompt construction for scene decomposition.
//!
//! The prompt is the only place formatting rules are stated; no other
//! component alters prompt text. Building is pure and deterministic so the
//! same script always yields byte-identical instruction text.

use storyboard_core::{MAX_SCENES, MIN_SCENES, ScriptText};

/// Build the instruction text for one attempt.
///
/// With `escalation = Some(n)`, appends a corrective block restating that
/// the previous attempt produced only `n` scenes and re-asserting the scene
/// floor with more aggressive atomization instructions. The escalated prompt
/// is a strict superset of the base prompt for the same script.
///
/// # Examples
///
/// ```
/// use storyboard_core::ScriptText;
/// use storyboard_scenes::build_prompt;
///
/// let script = ScriptText::new("The sun rose over the mountains.").unwrap();
/// let base = build_prompt(&script, None);
/// let escalated = build_prompt(&script, Some(10));
///
/// assert!(escalated.starts_with(&base));
/// assert!(escalated.contains("only generated 10 scenes"));
/// ```
pub fn build_prompt(script: &ScriptText, escalation: Option<usize>) -> String {
    let mut prompt = base_prompt(script);

    if let Some(count) = escalation {
        prompt.push_str(&format!(
            "\n\nCRITICAL RETRY INSTRUCTION: You only generated {count} scenes in your \
             previous attempt. This is INCORRECT. You MUST generate at least {MIN_SCENES} \
             scenes (scene_1 through scene_{MIN_SCENES} are REQUIRED by the schema). Break \
             down the script into MUCH smaller, more granular visual moments. Split every \
             sentence, every phrase, every visual detail, every action, every emotion into \
             separate scenes. Think of camera movements, transitions, close-ups, wide \
             shots - each is a scene. You MUST reach at least {MIN_SCENES} scenes."
        ));
    }

    prompt
}

/// The fixed instruction template plus the script text.
fn base_prompt(script: &ScriptText) -> String {
    format!(
        "You are a professional short-form video editor, cinematic b-roll planner, and \
         storytelling assistant.\n\
         \n\
         TASK: Break the provided script into EXACTLY {MIN_SCENES}-{MAX_SCENES} meaningful \
         visual beats for b-roll planning.\n\
         \n\
         CRITICAL RULES - READ CAREFULLY:\n\
         1. Preserve text: Keep the EXACT wording and meaning of the original script. Do NOT \
         rewrite, paraphrase, summarize, or add new text.\n\
         2. Scene logic: Each scene must represent one clear, standalone visual moment \
         suitable for a single b-roll shot.\n\
         3. Scene length: Each scene should contain only one short sentence or phrase.\n\
         4. Order: Maintain the original order, pacing, emotional flow, and narrative arc.\n\
         5. Splitting: Split text only where a natural visual or emotional shift occurs.\n\
         6. MANDATORY SCENE COUNT: You MUST generate EXACTLY {MIN_SCENES}-{MAX_SCENES} \
         scenes. NO EXCEPTIONS. The JSON schema REQUIRES scene_1 through scene_{MIN_SCENES} \
         to be present. You MUST fill all {MIN_SCENES} required scenes, and optionally add \
         up to {extra} more (scene_{first_optional}-scene_{MAX_SCENES}) if needed.\n\
         \n\
         HOW TO HANDLE SHORT SCRIPTS:\n\
         - If the script seems short, break EVERY sentence into multiple visual moments\n\
         - Split compound sentences into separate scenes\n\
         - Break down descriptive phrases into individual visual beats\n\
         - Extract every possible visual moment, action, emotion, or detail\n\
         - Think of camera angles, transitions, close-ups, wide shots - each is a scene\n\
         - If a sentence has multiple parts, split each part into its own scene\n\
         - Example: \"The sun rose over the mountains as birds sang\" = 3 scenes: \"The sun \
         rose\", \"over the mountains\", \"as birds sang\"\n\
         \n\
         OUTPUT REQUIREMENTS:\n\
         - You MUST output ONLY valid JSON\n\
         - scene_1 through scene_{MIN_SCENES} are REQUIRED by the schema - you MUST include \
         all of them\n\
         - You MAY include scene_{first_optional} through scene_{MAX_SCENES} if you have \
         more content (up to {MAX_SCENES} total)\n\
         - Use keys: scene_1, scene_2, scene_3, etc.\n\
         - Each value must be a string containing the script text for that scene\n\
         - DO NOT include any explanations, commentary, or additional text\n\
         - DO NOT include markdown formatting, code blocks, or backticks\n\
         - DO NOT include emojis, titles, or headings\n\
         - Output ONLY the raw JSON object, nothing before or after it\n\
         - FAILURE TO INCLUDE ALL {MIN_SCENES} REQUIRED SCENES WILL RESULT IN AN ERROR\n\
         \n\
         Example output format (MUST have at least {MIN_SCENES} scenes):\n\
         {{\"scene_1\":\"First visual moment\",\"scene_2\":\"Second visual moment\",\
         \"scene_3\":\"Third visual moment\",...\"scene_{MIN_SCENES}\":\"Twenty-fifth \
         visual moment\",\"scene_{first_optional}\":\"Twenty-sixth visual moment\"}}\n\
         \n\
         FINAL REMINDER: The schema requires scene_1 through scene_{MIN_SCENES}. You MUST \
         generate at least {MIN_SCENES} scenes. Break down the script as granularly as \
         needed to reach {MIN_SCENES} scenes.\n\
         \n\
         Script to process:\n\
         {script}",
        extra = MAX_SCENES - MIN_SCENES,
        first_optional = MIN_SCENES + 1,
        script = script.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> ScriptText {
        ScriptText::new("The sun rose over the mountains as birds sang.").unwrap()
    }

    #[test]
    fn base_prompt_is_deterministic() {
        assert_eq!(build_prompt(&script(), None), build_prompt(&script(), None));
    }

    #[test]
    fn base_prompt_embeds_script_verbatim() {
        let prompt = build_prompt(&script(), None);
        assert!(prompt.contains("The sun rose over the mountains as birds sang."));
        assert!(prompt.contains("EXACTLY 25-30"));
    }

    #[test]
    fn escalated_prompt_is_strict_superset() {
        let base = build_prompt(&script(), None);
        let escalated = build_prompt(&script(), Some(12));
        assert!(escalated.starts_with(&base));
        assert!(escalated.len() > base.len());
    }

    #[test]
    fn escalation_restates_observed_count() {
        let escalated = build_prompt(&script(), Some(7));
        assert!(escalated.contains("only generated 7 scenes"));
        assert!(escalated.contains("at least 25 scenes"));
    }
}
