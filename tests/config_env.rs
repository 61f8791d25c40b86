//! Environment overrides mutate process state, so they live in their own
//! test binary and are exercised by a single test.

use moonlander::config::{AppConfig, ConfigManager};
use std::io::Write;
use tempfile::NamedTempFile;

const POPULATION_VAR: &str = "MOONLANDER__EVOLUTION__POPULATION_SIZE";
const GRAVITY_VAR: &str = "MOONLANDER__PHYSICS__GRAVITY";

#[test]
fn test_environment_overrides_defaults_and_file() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(file, "[evolution]\npopulation_size = 12\nchromosome_length = 7").unwrap();

    std::env::set_var(POPULATION_VAR, "17");
    std::env::set_var(GRAVITY_VAR, "-2.5");

    let from_env = ConfigManager::new();
    let env_only = from_env.load_layered(None::<&std::path::Path>);
    let with_file = ConfigManager::new();
    let file_and_env = with_file.load_layered(Some(file.path()));

    std::env::remove_var(POPULATION_VAR);
    std::env::remove_var(GRAVITY_VAR);

    env_only.unwrap();
    file_and_env.unwrap();

    let config = from_env.get();
    assert_eq!(config.evolution.population_size, 17);
    assert_eq!(config.physics.gravity, -2.5);
    assert_eq!(config.mission, AppConfig::default().mission);

    // environment wins over the file, untouched file keys survive
    let config = with_file.get();
    assert_eq!(config.evolution.population_size, 17);
    assert_eq!(config.evolution.chromosome_length, 7);
    assert_eq!(config.physics.gravity, -2.5);

    let cleared = ConfigManager::new();
    cleared.load_layered(None::<&std::path::Path>).unwrap();
    assert_eq!(cleared.get(), AppConfig::default());
}
