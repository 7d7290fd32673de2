use serde::{Deserialize, Serialize};

/// Which conversion policy drives a blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Convert syllable by syllable as soon as each one matches.
    #[default]
    Incremental,
    /// Convert only when the whole input matches the answer.
    FullMatch,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::Incremental => f.write_str("incremental"),
            MatchPolicy::FullMatch => f.write_str("full-match"),
        }
    }
}

/// Pinyin-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All document dialect options from `drill_core::Config` (flattened via serde)
/// - Input handling options for the matchers
/// - The matching policy used by default
///
/// # Example
///
/// ```rust
/// use pinyin_drill::PinyinConfig;
///
/// let config = PinyinConfig::default();
/// assert!(config.neutral_tone_gate);
/// let base_config = config.into_base();
/// assert_eq!(base_config.placeholder, "BLANK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinyinConfig {
    /// Document dialect (section markers, delimiter, placeholder)
    #[serde(flatten)]
    pub base: drill_core::Config,

    /// Lower-case typed input before tone normalization
    pub lowercase_input: bool,

    /// Require an explicit tone digit before converting a neutral-tone
    /// syllable. Without it "ma" could still become "ma1".."ma4".
    pub neutral_tone_gate: bool,

    /// Policy used when none is requested explicitly
    pub default_policy: MatchPolicy,
}

impl Default for PinyinConfig {
    fn default() -> Self {
        Self {
            base: drill_core::Config::default(),
            lowercase_input: true,
            neutral_tone_gate: true,
            default_policy: MatchPolicy::Incremental,
        }
    }
}

impl PinyinConfig {
    /// Convert this pinyin config into the base config for the parser
    pub fn into_base(self) -> drill_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &drill_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut drill_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_base_fields_are_read() {
        let cfg = PinyinConfig::from_toml_str(
            "placeholder = \"___\"\nneutral_tone_gate = false\ndefault_policy = \"full-match\"\n",
        )
        .unwrap();
        assert_eq!(cfg.base.placeholder, "___");
        assert!(!cfg.neutral_tone_gate);
        assert!(cfg.lowercase_input);
        assert_eq!(cfg.default_policy, MatchPolicy::FullMatch);
        assert_eq!(cfg.base.blanks_marker, "## --blanks--");
    }

    #[test]
    fn load_toml_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "pinyin_drill_config_{}.toml", std::process::id()
        ));
        std::fs::write(
            &path,
            "placeholder = \"___\"\nlowercase_input = false\ndefault_policy = \"full-match\"\n",
        )
        .unwrap();
        let cfg = PinyinConfig::load_toml(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.base.placeholder, "___");
        assert!(!cfg.lowercase_input);
        assert!(cfg.neutral_tone_gate);
        assert_eq!(cfg.default_policy, MatchPolicy::FullMatch);

        assert!(PinyinConfig::load_toml(&path).is_err());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(PinyinConfig::from_toml_str("").unwrap(), PinyinConfig::default());
    }
}
