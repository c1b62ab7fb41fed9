use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ImageAlias {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of `lxc image list --format yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Image {
    pub fingerprint: String,
    #[serde(default)]
    pub aliases: Vec<ImageAlias>,
}

impl Image {
    pub fn new(fingerprint: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            aliases: aliases
                .iter()
                .map(|name| ImageAlias {
                    name: name.to_string(),
                    description: String::new(),
                })
                .collect(),
        }
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.name == alias)
    }
}

/// One entry of `lxc network list --format yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Network {
    pub name: String,
}
