use serde::{Deserialize, Serialize};
use std::fmt;

/// Group stage pool. Every team belongs to exactly one of the two pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub group: Group,
    /// Primary and secondary kit colors, as CSS color values.
    pub colors: [String; 2],
    /// Symbolic logo token rendered by the dashboard client.
    pub logo: String,
}

/// Creation payload for a team. The store assigns the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeamDraft {
    pub name: String,
    pub group: Group,
    pub colors: [String; 2],
    pub logo: String,
}

/// Explicit set of mutable team fields. Unknown fields are rejected,
/// the id is not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub group: Option<Group>,
    pub colors: Option<[String; 2]>,
    pub logo: Option<String>,
}

impl Team {
    pub fn apply_patch(&mut self, patch: TeamPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(logo) = patch.logo {
            self.logo = logo;
        }
    }
}

/// A squad member. Goal totals are not stored here: they are derived
/// from match scorer lists, so the record cannot drift from the matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team_id: u32,
    #[serde(default)]
    pub is_captain: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerDraft {
    pub name: String,
    pub team_id: u32,
    #[serde(default)]
    pub is_captain: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub team_id: Option<u32>,
    pub is_captain: Option<bool>,
}

impl Player {
    pub fn apply_patch(&mut self, patch: PlayerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(team_id) = patch.team_id {
            self.team_id = team_id;
        }
        if let Some(is_captain) = patch.is_captain {
            self.is_captain = is_captain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team {
            id: 1,
            name: String::from("City Stars"),
            group: Group::A,
            colors: [String::from("#1e3a8a"), String::from("#3b82f6")],
            logo: String::from("🛡️"),
        }
    }

    #[test]
    fn patch_changes_only_provided_fields() {
        let mut t = team();
        t.apply_patch(TeamPatch {
            name: Some(String::from("Metro Stars")),
            ..TeamPatch::default()
        });

        assert_eq!(t.name, "Metro Stars");
        assert_eq!(t.group, Group::A);
        assert_eq!(t.logo, "🛡️");
    }

    #[test]
    fn team_patch_rejects_unknown_fields() {
        let result: Result<TeamPatch, _> =
            serde_json::from_str(r#"{"name":"X","points":99}"#);
        assert!(result.is_err());
    }

    #[test]
    fn player_patch_cannot_set_goals() {
        let result: Result<PlayerPatch, _> = serde_json::from_str(r#"{"goals":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn player_wire_format_is_camel_case() {
        let p = Player {
            id: 101,
            name: String::from("Ahmed Ben Ali"),
            team_id: 1,
            is_captain: true,
        };

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["teamId"], 1);
        assert_eq!(json["isCaptain"], true);
    }
}
