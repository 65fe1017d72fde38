mod client;
mod types;

pub use client::{DashScopeClient, ImageEditClient};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleCatalog;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_style_request_wire_format() {
        let catalog = StyleCatalog::builtin();
        let style = catalog.lookup("贵州皮纸").unwrap();
        let request = GenerationRequest::for_style(style, "data:image/jpeg;base64,AAAA");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "qwen-image-edit-max",
                "input": {
                    "messages": [{
                        "role": "user",
                        "content": [
                            {"image": "data:image/jpeg;base64,AAAA"},
                            {"text": style.positive_prompt}
                        ]
                    }]
                },
                "parameters": {
                    "n": 1,
                    "negative_prompt": style.negative_prompt,
                    "size": "1024*1024",
                    "prompt_extend": true,
                    "watermark": true
                }
            })
        );
    }

    #[test]
    fn test_style_request_is_deterministic() {
        let catalog = StyleCatalog::builtin();
        let style = catalog.lookup("棠岙竹纸").unwrap();
        assert_eq!(
            GenerationRequest::for_style(style, "data:image/png;base64,x"),
            GenerationRequest::for_style(style, "data:image/png;base64,x")
        );
    }

    #[test]
    fn test_describe_request_has_only_output_count() {
        let request = GenerationRequest::describe("qwen-image-edit-max", "data:image/png;base64,x");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["parameters"], json!({"n": 1}));
        assert_eq!(
            value["input"]["messages"][0]["content"][1],
            json!({"text": DESCRIBE_PROMPT})
        );
    }

    #[test]
    fn test_content_parts_deserialize_by_shape() {
        let parts: Vec<ContentPart> =
            serde_json::from_value(json!([{"image": "u"}, {"text": "t"}])).unwrap();
        assert_eq!(
            parts,
            vec![
                ContentPart::Image {
                    image: "u".to_string()
                },
                ContentPart::Text {
                    text: "t".to_string()
                }
            ]
        );
    }
}
