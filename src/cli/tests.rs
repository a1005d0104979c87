use super::*;
use clap::Parser;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn defaults_match_documented_surface() {
    let args = parse_args(&["nimchat"]);
    assert_eq!(args.model, "qwen/qwen3-next-80b-a3b-instruct");
    assert_eq!(args.temperature, 0.6);
    assert_eq!(args.top_p, 0.7);
    assert_eq!(args.max_tokens, 4096);
    assert_eq!(args.prompt, None);
}

#[test]
fn flags_override_defaults() {
    let argv = [
        "nimchat",
        "--model",
        "deepseek-ai/deepseek-v3.1-terminus",
        "--temperature",
        "0.2",
        "--top_p",
        "0.9",
        "--max_tokens",
        "256",
    ];
    let args = parse_args(&argv);
    assert_eq!(args.model, "deepseek-ai/deepseek-v3.1-terminus");
    assert_eq!(args.temperature, 0.2);
    assert_eq!(args.top_p, 0.9);
    assert_eq!(args.max_tokens, 256);
}

#[test]
fn underscore_flag_spellings_are_kept() {
    // The flags are --top_p and --max_tokens, not kebab-case.
    assert!(Args::try_parse_from(["nimchat", "--top-p", "0.9"]).is_err());
    assert!(Args::try_parse_from(["nimchat", "--max-tokens", "10"]).is_err());
}

#[test]
fn prompt_flag_selects_one_shot_mode() {
    let args = parse_args(&["nimchat", "--prompt", "hello there"]);
    assert_eq!(args.prompt.as_deref(), Some("hello there"));
}

#[test]
fn sampling_params_mirror_parsed_flags() {
    let args = parse_args(&["nimchat", "--temperature", "0.4", "--max_tokens", "512"]);
    let params = args.sampling_params();
    assert_eq!(params.temperature, 0.4);
    assert_eq!(params.top_p, 0.7);
    assert_eq!(params.max_tokens, 512);
}
