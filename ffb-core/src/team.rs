use std::sync::Arc;

use getset::{CopyGetters, Getters};

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Coach {
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    is_home: bool,
}

impl Coach {
    pub fn new(name: impl Into<String>, is_home: bool) -> Self {
        Self {
            name: name.into(),
            is_home,
        }
    }
}

/// Which side of the table a chat line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChatSource {
    #[default]
    Unknown,
    Home,
    Away,
    Spectator,
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Team {
    #[getset(get = "pub")]
    id: String,
    #[getset(get = "pub")]
    coach: Arc<Coach>,
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    fame: i32,
    #[getset(get_copy = "pub")]
    fan_factor: i32,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        coach: Arc<Coach>,
        name: impl Into<String>,
        fame: i32,
        fan_factor: i32,
    ) -> Self {
        Self {
            id: id.into(),
            coach,
            name: name.into(),
            fame,
            fan_factor,
        }
    }

    pub fn is_home(&self) -> bool {
        self.coach.is_home()
    }
}

/// A roster template shared by every player bought for that position.
/// Built once per snapshot and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
#[getset(get = "pub")]
pub struct Position {
    id: String,
    label: String,
    name: String,
    icon_url: Option<String>,
    portrait_url: Option<String>,
    skills: Vec<String>,
}

impl Position {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
        icon_url: Option<String>,
        portrait_url: Option<String>,
        skills: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            name: name.into(),
            icon_url,
            portrait_url,
            skills,
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}
