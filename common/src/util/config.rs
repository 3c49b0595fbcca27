use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_size")]
    pub size: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: default_board_size(),
        }
    }
}

/// One step of the restart schedule: how many synthesis attempts to spend
/// and how many runner-up pairs the heuristic may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StageConfig {
    pub max_attempts: u64,
    pub window: usize,
}

impl StageConfig {
    pub const fn new(max_attempts: u64, window: usize) -> Self {
        Self {
            max_attempts,
            window,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_stages")]
    pub stages: Vec<StageConfig>,
    /// Base seed for per-attempt generators. `None` draws one per run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            seed: None,
            parallel: default_parallel(),
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_case_file")]
    pub case_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            case_file: default_case_file(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_tile_px")]
    pub tile_px: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tile_px: default_tile_px(),
        }
    }
}

fn default_board_size() -> u32 {
    10
}

pub const DEFAULT_STAGES: [StageConfig; 8] = [
    StageConfig::new(50, 0),
    StageConfig::new(200, 1),
    StageConfig::new(500, 2),
    StageConfig::new(1_000, 3),
    StageConfig::new(10_000, 4),
    StageConfig::new(100_000, 5),
    StageConfig::new(1_000_000, 6),
    StageConfig::new(10_000_000, 7),
];

fn default_stages() -> Vec<StageConfig> {
    DEFAULT_STAGES.to_vec()
}

fn default_parallel() -> bool {
    true
}

fn default_batch_size() -> usize {
    256
}

fn default_case_file() -> String {
    "cases/example.toml".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_tile_px() -> u32 {
    48
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.board.size, 10);
        assert_eq!(config.search.stages.len(), 8);
        assert_eq!(config.search.stages[7], StageConfig::new(10_000_000, 7));
        assert!(config.search.seed.is_none());
        assert!(!config.render.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[board]
size = 7

[search]
seed = 42
parallel = false
stages = [{ max_attempts = 10, window = 0 }, { max_attempts = 20, window = 2 }]
"#,
        )
        .unwrap();
        assert_eq!(config.board.size, 7);
        assert_eq!(config.search.seed, Some(42));
        assert!(!config.search.parallel);
        assert_eq!(config.search.batch_size, 256);
        assert_eq!(config.search.stages[1].window, 2);
        assert_eq!(config.input.output_dir, "output");
    }
}
