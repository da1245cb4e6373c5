// ── Configuration ────────────────────────────────────────────────────────────

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Process configuration, read from the environment once at startup and
/// injected into handlers via shared state. A missing API key is non-fatal;
/// it only disables real completions.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub use_mock: bool,
    pub bind_addr: String,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("GOOGLE_API_KEY"),
            use_mock: bool_var("SIMPLIFY_USE_MOCK"),
            bind_addr: non_empty_var("SIMPLIFY_BIND")
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            model: non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn api_key_present(&self) -> bool {
        self.api_key.is_some()
    }
}

/// An empty or whitespace-only variable counts as unset.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bool_var(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("True")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_counts_as_absent() {
        let cfg = AppConfig {
            api_key: non_empty_var("PAGE_SIMPLIFIER_TEST_UNSET_KEY"),
            use_mock: false,
            bind_addr: DEFAULT_BIND.to_string(),
            model: DEFAULT_MODEL.to_string(),
        };
        assert!(!cfg.api_key_present());
    }

    #[test]
    fn bool_var_accepts_one_and_true() {
        std::env::set_var("PAGE_SIMPLIFIER_TEST_FLAG_A", "1");
        std::env::set_var("PAGE_SIMPLIFIER_TEST_FLAG_B", "true");
        std::env::set_var("PAGE_SIMPLIFIER_TEST_FLAG_C", "0");
        assert!(bool_var("PAGE_SIMPLIFIER_TEST_FLAG_A"));
        assert!(bool_var("PAGE_SIMPLIFIER_TEST_FLAG_B"));
        assert!(!bool_var("PAGE_SIMPLIFIER_TEST_FLAG_C"));
        assert!(!bool_var("PAGE_SIMPLIFIER_TEST_FLAG_UNSET"));
    }
}
