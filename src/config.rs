use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Notes {
  pub velocity: i32,
  pub channel: u8,
}

impl Default for Notes {
  fn default() -> Notes {
    Notes {
      velocity: 100,
      channel: 0,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct History {
  pub max_steps: usize,
}

impl Default for History {
  fn default() -> History {
    History { max_steps: 128 }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub notes: Notes,
  pub history: History,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      notes: Notes::default(),
      history: History::default(),
    }
  }
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}
