use crate::error::SettingsError;
use serde::{Deserialize, Serialize};

/// Per-group configuration, persisted across restarts.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct GroupSettings {
    /// Prefix that marks a chat line as a command.
    pub prefix: String,
    /// The only channel game commands are accepted in.
    pub channel: String,
    /// Whether board and role images are attached to announcements.
    pub visuals: bool,
}

/// Group settings stored in a sled tree as JSON, keyed by group id.
pub struct SettingsStore {
    tree: sled::Tree,
    defaults: GroupSettings,
}

impl SettingsStore {
    pub fn open(db: &sled::Db, defaults: GroupSettings) -> Result<Self, SettingsError> {
        Ok(Self { tree: db.open_tree("settings")?, defaults })
    }

    /// Gets the settings of a group, falling back to the defaults if none are stored or they
    /// cannot be read.
    pub fn get(&self, group: &str) -> GroupSettings {
        match self.load(group) {
            Ok(Some(settings)) => settings,
            Ok(None) => self.defaults.clone(),
            Err(err) => {
                log::error!("Could not read settings for group {}: {}", group, err);
                self.defaults.clone()
            }
        }
    }

    /// Applies a change to a group's settings and persists the result.
    pub fn update<F>(&self, group: &str, change: F) -> Result<GroupSettings, SettingsError>
    where
        F: FnOnce(&mut GroupSettings),
    {
        let mut settings = self.get(group);
        change(&mut settings);
        self.tree.insert(group.as_bytes(), serde_json::to_vec(&settings)?)?;
        Ok(settings)
    }

    /// Forgets a group's settings so the defaults apply again.
    pub fn reset(&self, group: &str) -> Result<GroupSettings, SettingsError> {
        self.tree.remove(group.as_bytes())?;
        Ok(self.defaults.clone())
    }

    fn load(&self, group: &str) -> Result<Option<GroupSettings>, SettingsError> {
        let Some(bytes) = self.tree.get(group.as_bytes())? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[cfg(test)]
impl SettingsStore {
    pub fn defaults(&self) -> &GroupSettings {
        &self.defaults
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    pub fn temporary_store() -> SettingsStore {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let defaults = GroupSettings { prefix: "!".to_string(), channel: "secret-hitler".to_string(), visuals: true };
        SettingsStore::open(&db, defaults).unwrap()
    }

    #[test]
    fn defaults_until_changed() {
        let store = temporary_store();
        assert_eq!(store.get("guild"), *store.defaults());

        let updated = store.update("guild", |s| s.prefix = "?".to_string()).unwrap();
        assert_eq!(updated.prefix, "?");
        assert_eq!(store.get("guild").prefix, "?");
        assert_eq!(store.get("guild").channel, "secret-hitler");

        // Groups are independent
        assert_eq!(store.get("other").prefix, "!");
    }

    #[test]
    fn reset_restores_defaults() {
        let store = temporary_store();
        store.update("guild", |s| s.visuals = false).unwrap();
        assert!(!store.get("guild").visuals);

        assert_eq!(store.reset("guild").unwrap(), *store.defaults());
        assert!(store.get("guild").visuals);
    }

    #[test]
    fn malformed_entries_fall_back_to_defaults() {
        let store = temporary_store();
        store.tree.insert("guild", "not json").unwrap();
        assert_eq!(store.get("guild"), *store.defaults());
    }
}
