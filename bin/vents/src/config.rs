use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use airtouch::Group;

use crate::{Coordinator, Error, Result};

const HOST: &str = "AIRTOUCH_HOST";
const SCAN_INTERVAL: &str = "AIRTOUCH_SCAN_INTERVAL";
const GROUPS: &str = "AIRTOUCH_GROUPS";

#[derive(Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub scan_interval: Duration,
    pub groups: Vec<Group>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup(HOST).ok_or(Error::MissingVariable(HOST))?;

        let scan_interval = match lookup(SCAN_INTERVAL) {
            Some(value) => value
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(Error::InvalidVariable(SCAN_INTERVAL, value))?,
            None => Coordinator::DEFAULT_UPDATE_INTERVAL,
        };

        let groups = match lookup(GROUPS) {
            Some(value) => parse_groups(&value).ok_or(Error::InvalidVariable(GROUPS, value))?,
            None => vec![],
        };

        Ok(Self {
            host,
            scan_interval,
            groups,
        })
    }
}

fn parse_groups(value: &str) -> Option<Vec<Group>> {
    let names: HashMap<String, String> = serde_json::from_str(value).ok()?;
    let count = names.len();

    let groups = names
        .into_iter()
        .map(|(number, name)| Some((number.parse().ok()?, name)))
        .collect::<Option<BTreeMap<u8, String>>>()?;

    // "3" and "03" name the same group
    if groups.len() != count {
        return None;
    }

    Some(
        groups
            .into_iter()
            .map(|(number, name)| Group::new(number, name, 0))
            .collect(),
    )
}
