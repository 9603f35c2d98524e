//! Fixed instruction template for the enhancement request. Pure string
//! building, no I/O.

/// System instruction sent with every request. The model must answer with
/// JSON only, in the nine-field shape the rest of the app decodes.
pub const SYSTEM_INSTRUCTION: &str = r#"Parse the user's image prompt and intelligently fill any missing fields to create an enhanced prompt. Return ONLY valid JSON with the following structure:

{
  "subject": "Main subject or character",
  "action": "What the subject is doing",
  "style_or_medium": "Artistic style or rendering medium",
  "lighting_or_mood": "Lighting conditions or emotional tone",
  "camera_angle_or_composition": "Perspective or arrangement",
  "background_or_environment": "Setting or surroundings",
  "specific_details_or_accessories": "Notable items or features",
  "color_scheme_or_palette": "Color theme",
  "final_prompt": "Complete prompt combining all elements"
}

Parse any elements explicitly mentioned in the user's text. If a field is missing information, suggest a contextually appropriate value based on keywords or inferred theme. Build the final_prompt by combining all 8 fields into a natural language sentence, even if some values were auto-suggested. If an element cannot be reasonably inferred, leave it as an empty string.

The final_prompt should read as a cohesive description that could be submitted to an image generation AI."#;

pub const USER_MESSAGE_PREFIX: &str = "Create an enhanced image prompt for: ";

/// Wraps the raw idea verbatim. No truncation, no escaping — the 300-char
/// cap on the input box is display-level only.
pub fn user_message(idea: &str) -> String {
    format!("{USER_MESSAGE_PREFIX}{idea}")
}

/// Canned inspiration ideas shown on the page; each behaves as an alternate
/// submit trigger.
pub const EXAMPLE_IDEAS: [&str; 5] = [
    "A fox reading a book in the forest",
    "Cyberpunk samurai on a motorcycle",
    "A floating island with a castle and waterfalls",
    "Astronaut in an underwater temple",
    "Steampunk train station at sunset",
];
