//! Scenario assembly and tuning-file loading.

use std::path::Path;

use anyhow::{Context, Result};
use heist_ai::{CombatStyle, Tuning};
use heist_core::Vec3;
use thiserror::Error;

use crate::world::{Obstacle, SimAgent, SimWorld};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario has no agents")]
    NoAgents,
    #[error("scenario has no base points")]
    NoBasePoints,
}

/// Assembles a [`SimWorld`] piece by piece.
pub struct ScenarioBuilder {
    agents: Vec<SimAgent>,
    objective: Vec3,
    covers: Vec<Vec3>,
    bases: Vec<Vec3>,
    obstacles: Vec<Obstacle>,
    tuning: Tuning,
    next_id: u64,
}

impl ScenarioBuilder {
    pub fn new(objective: Vec3) -> Self {
        Self {
            agents: Vec::new(),
            objective,
            covers: Vec::new(),
            bases: Vec::new(),
            obstacles: Vec::new(),
            tuning: Tuning::default(),
            next_id: 0,
        }
    }

    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn boss(mut self, pos: Vec3) -> Self {
        let health = self.tuning.boss_max_health;
        let id = self.next_id;
        self.next_id += 1;
        self.agents.push(SimAgent::boss(id, pos, health));
        self
    }

    /// Melee raiders start at full health, ranged ones at half, as the
    /// original roster did.
    pub fn raider(mut self, pos: Vec3, style: CombatStyle, base: Vec3) -> Self {
        let health = match style {
            CombatStyle::Melee => self.tuning.max_health,
            CombatStyle::Ranged => (self.tuning.max_health / 2).max(1),
        };
        let id = self.next_id;
        self.next_id += 1;
        self.agents.push(SimAgent::raider(id, pos, style, health, base));
        if !self.bases.contains(&base) {
            self.bases.push(base);
        }
        self
    }

    pub fn cover(mut self, pos: Vec3) -> Self {
        self.covers.push(pos);
        self
    }

    pub fn obstacle(mut self, center: Vec3, radius: f32) -> Self {
        self.obstacles.push(Obstacle { center, radius });
        self
    }

    pub fn build(self) -> Result<SimWorld, ScenarioError> {
        if self.agents.is_empty() {
            return Err(ScenarioError::NoAgents);
        }
        if self.bases.is_empty() {
            return Err(ScenarioError::NoBasePoints);
        }
        Ok(SimWorld::assemble(
            self.agents,
            self.objective,
            self.covers,
            self.bases,
            self.obstacles,
            self.tuning,
        ))
    }
}

/// The shipped arena: boss guarding the objective at the center, two
/// melee and one ranged raider spawning at the rim, cover along the
/// flanks, one obstacle patch between spawn and treasure.
pub fn standard_raid(tuning: Tuning) -> SimWorld {
    let objective = Vec3::new(0.0, 0.0, 0.0);
    let spawn = Vec3::new(24.0, 0.0, 0.0);
    ScenarioBuilder::new(objective)
        .tuning(tuning)
        .boss(Vec3::new(3.0, 0.0, 0.0))
        .raider(Vec3::new(24.0, 0.0, 2.0), CombatStyle::Melee, spawn)
        .raider(Vec3::new(24.0, 0.0, -2.0), CombatStyle::Melee, spawn)
        .raider(Vec3::new(26.0, 0.0, 0.0), CombatStyle::Ranged, spawn)
        .cover(Vec3::new(10.0, 0.0, 9.0))
        .cover(Vec3::new(10.0, 0.0, -9.0))
        .cover(Vec3::new(18.0, 0.0, 4.0))
        .obstacle(Vec3::new(12.0, 0.0, 3.0), 1.5)
        .build()
        .expect("standard raid scenario is well formed")
}

/// Load tuning overrides from a YAML file.
pub fn load_tuning(path: &Path) -> Result<Tuning> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    let tuning: Tuning = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse tuning file {}", path.display()))?;
    Ok(tuning)
}
