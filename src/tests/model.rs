// Unit Tests for Model Descriptor and Composite Uid
//
// UNIT UNDER TEST: ModelDescriptor
//
// BUSINESS RESPONSIBILITY:
//   - Derives the stable composite identifier "{provider}:{model}"
//   - Parses a uid back into exactly the original provider/model pair
//   - The uid is the sole external identity of a model
//
// TEST COVERAGE:
//   - Round-trip for every registered provider id
//   - Model ids containing the separator character
//   - Rejection of malformed uids and unknown provider ids

use crate::core_types::model::ModelDescriptor;
use crate::registry::{ProviderId, ProviderRegistry};

#[test]
fn test_uid_concatenates_provider_and_model() {
    let model = ModelDescriptor::new(ProviderId::OpenAi, "gpt-4.1-mini");

    assert_eq!(model.uid(), "openai:gpt-4.1-mini");
}

#[test]
fn test_uid_round_trips_for_every_registered_provider() {
    // Provider ids never contain the separator, so parsing must recover
    // exactly the original pair for all of them

    let registry = ProviderRegistry::with_default_providers().unwrap();

    for id in registry.provider_ids() {
        let model = ModelDescriptor::new(id, "some-model");
        let parsed = ModelDescriptor::from_uid(&model.uid()).expect("uid should parse");

        assert_eq!(parsed.provider_id, id);
        assert_eq!(parsed.model_id, "some-model");
    }
}

#[test]
fn test_uid_round_trips_with_separator_in_model_id() {
    // OpenRouter model ids routinely contain '/' and may contain ':';
    // splitting on the first separator keeps the model id intact

    let model = ModelDescriptor::new(ProviderId::OpenRouter, "qwen/qwen3-14b");
    let parsed = ModelDescriptor::from_uid(&model.uid()).unwrap();

    assert_eq!(parsed.provider_id, ProviderId::OpenRouter);
    assert_eq!(parsed.model_id, "qwen/qwen3-14b");

    let odd = ModelDescriptor::new(ProviderId::OpenRouter, "vendor:model:v2");
    let parsed = ModelDescriptor::from_uid(&odd.uid()).unwrap();

    assert_eq!(parsed.model_id, "vendor:model:v2");
}

#[test]
fn test_from_uid_rejects_malformed_input() {
    assert!(ModelDescriptor::from_uid("no-separator").is_none());
    assert!(ModelDescriptor::from_uid("openai:").is_none());
    assert!(ModelDescriptor::from_uid("acme-ai:gpt-4").is_none());
    assert!(ModelDescriptor::from_uid("").is_none());
}

#[test]
fn test_display_prefers_title() {
    let untitled = ModelDescriptor::new(ProviderId::DeepSeek, "deepseek-chat");
    assert_eq!(untitled.to_string(), "deepseek:deepseek-chat");

    let titled = untitled.with_title("DeepSeek — deepseek-chat");
    assert_eq!(titled.to_string(), "DeepSeek — deepseek-chat");
}
