use std::fmt::Write;

use crate::core::models::request::GenerationRequest;

/// Field names the model must use; [`crate::core::models::post::RawPost`]
/// depends on this exact shape.
const RESPONSE_SHAPE: &str = r#"{
    "title": "Catchy blog post title",
    "metaDescription": "SEO meta description 150-160 chars",
    "content": "Full HTML formatted blog post content",
    "readingTime": 5,
    "keywords": ["extracted", "keywords"],
    "imageSuggestions": ["Image 1: Description", "Image 2: Description"]
}"#;

/// Build the blog post generation prompt for a request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::with_capacity(2048);

    // write! into a String cannot fail.
    let _ = writeln!(
        prompt,
        "Write a comprehensive, engaging blog post about: \"{}\"",
        request.topic
    );

    prompt.push_str("\nRequirements:\n");
    let _ = writeln!(prompt, "- Tone: {}", request.tone);
    let _ = writeln!(
        prompt,
        "- Target length: approximately {} words",
        request.length
    );
    let seo = if request.seo_optimized {
        "Yes - include natural keyword usage and proper heading structure"
    } else {
        "No"
    };
    let _ = writeln!(prompt, "- SEO optimized: {}", seo);
    if !request.keywords.is_empty() {
        let _ = writeln!(
            prompt,
            "- Target SEO Keywords: {}",
            request.keywords.join(", ")
        );
    }

    prompt.push_str(
        "\nStructure:\n\
         1. Compelling, click-worthy title (60-70 characters)\n\
         2. Meta description for SEO (150-160 characters)\n\
         3. Engaging introduction that hooks the reader\n\
         4. Well-structured body with clear subheadings (H2, H3)\n\
         5. Practical examples, tips, or insights\n\
         6. Strong conclusion with call-to-action\n",
    );
    if request.include_image_suggestions {
        prompt.push_str("7. 3-5 image suggestions with detailed descriptions\n");
    }

    prompt.push_str("\nWriting Guidelines:\n");
    let _ = writeln!(prompt, "- Use {} language throughout", request.tone);
    prompt.push_str(
        "- Include relevant statistics or data points when appropriate\n\
         - Break up text with subheadings every 200-300 words\n\
         - Use bullet points or numbered lists for clarity\n\
         - Write in HTML format with proper tags (<h2>, <h3>, <p>, <ul>, <li>, <strong>, <em>)\n\
         - Ensure content is original, informative, and valuable\n",
    );

    prompt.push_str("\nReturn the result in this exact JSON format:\n");
    prompt.push_str(RESPONSE_SHAPE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::request::Credential;

    fn request(topic: &str, keywords: &[&str]) -> GenerationRequest {
        let mut req = GenerationRequest::new(topic, Credential::new("k"));
        req.keywords = keywords.iter().map(|k| k.to_string()).collect();
        req
    }

    #[test]
    fn contains_topic() {
        let prompt = build_prompt(&request("Zero-copy parsing in Rust", &[]));
        assert!(prompt.contains("\"Zero-copy parsing in Rust\""));
    }

    #[test]
    fn contains_every_keyword() {
        let prompt = build_prompt(&request("Rust", &["serde", "nom", "zero-copy"]));
        assert!(prompt.contains("Target SEO Keywords: serde, nom, zero-copy"));
        for kw in ["serde", "nom", "zero-copy"] {
            assert!(prompt.contains(kw));
        }
    }

    #[test]
    fn no_keyword_section_when_empty() {
        let prompt = build_prompt(&request("Rust", &[]));
        assert!(!prompt.contains("Target SEO Keywords"));
    }

    #[test]
    fn tone_and_length_are_embedded() {
        let mut req = request("Rust", &[]);
        req.tone = "casual".into();
        req.length = 500;
        let prompt = build_prompt(&req);
        assert!(prompt.contains("- Tone: casual"));
        assert!(prompt.contains("Use casual language throughout"));
        assert!(prompt.contains("approximately 500 words"));
    }

    #[test]
    fn seo_flag_controls_guidance() {
        let mut req = request("Rust", &[]);
        assert!(build_prompt(&req).contains("SEO optimized: Yes - include natural keyword usage"));
        req.seo_optimized = false;
        assert!(build_prompt(&req).contains("SEO optimized: No\n"));
    }

    #[test]
    fn image_suggestions_item_is_optional() {
        let mut req = request("Rust", &[]);
        assert!(build_prompt(&req).contains("7. 3-5 image suggestions"));
        req.include_image_suggestions = false;
        assert!(!build_prompt(&req).contains("7. 3-5 image suggestions"));
    }

    #[test]
    fn demands_exact_json_fields() {
        let prompt = build_prompt(&request("Rust", &[]));
        for field in [
            "\"title\"",
            "\"metaDescription\"",
            "\"content\"",
            "\"readingTime\"",
            "\"keywords\"",
            "\"imageSuggestions\"",
        ] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.ends_with('}'));
    }

    #[test]
    fn deterministic() {
        let req = request("Rust", &["a", "b"]);
        assert_eq!(build_prompt(&req), build_prompt(&req));
    }
}
