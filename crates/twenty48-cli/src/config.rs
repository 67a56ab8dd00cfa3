use std::io::Read;

use twenty48_core::{Rules, Variant};

use crate::actor::strategies::StrategyKind;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Preset used when no explicit `[rules]` table is given.
    #[serde(default)]
    pub variant: Variant,

    /// Full rule set; takes precedence over `variant` when present.
    #[serde(default)]
    pub rules: Option<Rules>,

    /// Base seed. Game `i` of a batch uses `seed + i`.
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    #[serde(default)]
    pub auto: Auto,
}

/// Settings for unattended play.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Auto {
    #[serde(default = "defaults::games")]
    pub games: u32,
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Stop a game after this many intents even if it has not ended.
    #[serde(default = "defaults::max_turns")]
    pub max_turns: u64,
    /// Worker threads (defaults to Rayon default)
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            rules: None,
            seed: defaults::seed(),
            auto: Auto::default(),
        }
    }
}

impl Default for Auto {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            strategy: StrategyKind::default(),
            max_turns: defaults::max_turns(),
            workers: None,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// Rules for new games: the explicit table if present, otherwise the preset.
    pub fn resolved_rules(&self) -> Rules {
        self.rules
            .clone()
            .unwrap_or_else(|| Rules::preset(self.variant))
    }
}

mod defaults {
    pub fn seed() -> u64 { 0 }
    pub fn games() -> u32 { 100 }
    pub fn max_turns() -> u64 { 100_000 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use twenty48_core::engine::SpawnStrategy;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = write_config("");
        let cfg = Config::from_toml(file.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.resolved_rules(), Rules::preset(Variant::Classic));
    }

    #[test]
    fn variant_selects_preset() {
        let file = write_config("variant = \"sandbox\"\nseed = 9\n");
        let cfg = Config::from_toml(file.path()).unwrap();
        assert_eq!(cfg.seed, 9);
        let rules = cfg.resolved_rules();
        assert_eq!(rules.size, 8);
        assert!(!rules.spawn);
    }

    #[test]
    fn rules_table_overrides_variant() {
        let file = write_config(
            r#"
            variant = "large"

            [rules]
            size = 5
            detect_game_over = false
            spawn_strategy = "rejection"
            four_chance = 0.1
            initial_rows = [{ row = 4, values = [2, 2] }]

            [auto]
            games = 8
            strategy = "greedy"
            workers = 2
            "#,
        );
        let cfg = Config::from_toml(file.path()).unwrap();
        let rules = cfg.resolved_rules();
        assert_eq!(rules.size, 5);
        assert!(rules.spawn);
        assert!(!rules.detect_game_over);
        assert_eq!(rules.initial_tiles, 2);
        assert_eq!(rules.spawn_strategy, SpawnStrategy::Rejection);
        assert_eq!(rules.initial_rows.len(), 1);
        rules.validate().unwrap();
        assert_eq!(cfg.auto.games, 8);
        assert_eq!(cfg.auto.strategy, StrategyKind::Greedy);
        assert_eq!(cfg.auto.workers, Some(2));
        assert_eq!(cfg.auto.max_turns, 100_000);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let file = write_config("variant = \"enormous\"");
        assert!(Config::from_toml(file.path()).is_err());
        assert!(Config::from_toml("/definitely/not/here.toml").is_err());
    }
}
