//! Prompt text sent to the language model.

use crate::business::BusinessInfo;
use sonasite_document::SectionKind;

/// Instructions for generating a complete site document
pub fn site_prompt(info: &BusinessInfo) -> String {
    let order = SectionKind::ALL
        .iter()
        .map(|kind| format!("'{}'", kind))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are Sonasite AI, an expert website designer and copywriter.
Generate a complete JSON structure for a professional, industry-specific website.
The business is a "{business_type}" called "{name}" in "{location}".
Generate all content in the following language: "{language}".
Respond with a single JSON object of the shape {{"businessName", "language", "pages": {{"home": [sections]}}, "theme"}}. Do not add extra fields.
- Every section has a unique "id", a "type" and a "content" object.
- Create the sections in this order: {order}.
- For the 'header' section: provide a list of navLinks (e.g., Home, About, Services, Contact) and a ctaButton with text.
- Write persuasive, high-converting copy for all text fields.
- For all 'imageUrl' or 'logoUrl' fields, provide a realistic, high-quality image URL using keywords related to the business type and location.
- For 'services' items, include a title, a short description, and a realistic price.
- For 'gallery', provide at least 4 image URLs.
- For 'testimonials', create 3 realistic testimonials. Use the 'title' field for the person's name and the 'description' field for their quote.
- For the 'footer', write a copyright notice in 'text' with the current year and business name, and include social media links in 'links'.
- For the 'theme': provide a 'primaryColor' (hex), a complementary 'secondaryColor' (hex), and a 'fontFamily' from Google Fonts (e.g., 'Inter', 'Poppins', 'Lato')."#,
        business_type = info.business_type,
        name = info.name,
        location = info.location,
        language = info.language,
        order = order,
    )
}

/// Instructions for generating a marketing campaign toward `goal`
pub fn campaign_prompt(info: &BusinessInfo, goal: &str) -> String {
    format!(
        r#"You are a marketing expert AI. Generate a complete, ready-to-use marketing campaign for a {business_type} called "{name}".
The campaign goal is: "{goal}".
The campaign should be in this language: {language}.

Generate a JSON object with three keys: "googleAd", "facebookPost", and "email".
- "googleAd": provide a "headline" (max 30 chars), "description" (max 90 chars), and "cta" (Call To Action).
- "facebookPost": provide "text" (engaging and friendly, with emojis) and an "imageDescription" for an AI image generator.
- "email": provide a "subject" and a "body" in plain text. The body should be concise and persuasive."#,
        business_type = info.business_type,
        name = info.name,
        goal = goal,
        language = info.language,
    )
}
