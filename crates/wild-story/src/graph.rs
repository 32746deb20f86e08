//! The validated scene graph.
//!
//! A graph is checked once when it is built. After that every transition
//! target exists, every battle names a known enemy, and every choice resolves
//! to some successor whatever the stats are.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use wild_battle::EnemyRoster;

use crate::condition::Condition;
use crate::error::{GraphIssue, StoryError, StoryResult};
use crate::scene::{Scene, SceneId, SceneKind, SceneTarget};

/// On-disk form of a story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFile {
    /// Id of the first scene.
    pub start: SceneId,
    /// All scenes, in any order.
    pub scenes: Vec<Scene>,
    /// Enemies referenced by battle scenes. Defaults to the standard roster.
    #[serde(default = "EnemyRoster::standard")]
    pub enemies: EnemyRoster,
}

/// An immutable, validated story.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    start: SceneId,
    scenes: BTreeMap<SceneId, Scene>,
    enemies: EnemyRoster,
}

impl SceneGraph {
    /// Build and validate a graph.
    pub fn new(start: SceneId, scenes: Vec<Scene>, enemies: EnemyRoster) -> StoryResult<Self> {
        let mut issues = Vec::new();
        let mut map = BTreeMap::new();
        for scene in scenes {
            let id = scene.id;
            if map.insert(id, scene).is_some() {
                issues.push(GraphIssue::DuplicateScene(id));
            }
        }
        let graph = Self {
            start,
            scenes: map,
            enemies,
        };
        issues.extend(graph.issues());
        if issues.is_empty() {
            log::debug!("scene graph validated: {} scenes", graph.len());
            Ok(graph)
        } else {
            Err(StoryError::InvalidGraph(issues))
        }
    }

    /// Build from a deserialized story file.
    pub fn from_file(file: StoryFile) -> StoryResult<Self> {
        Self::new(file.start, file.scenes, file.enemies)
    }

    /// Parse and validate a JSON story.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        let file: StoryFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// The on-disk form of this graph.
    pub fn to_file(&self) -> StoryFile {
        StoryFile {
            start: self.start,
            scenes: self.scenes.values().cloned().collect(),
            enemies: self.enemies.clone(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> StoryResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    fn issues(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        if let Err(e) = self.enemies.validate() {
            issues.push(GraphIssue::InvalidEnemy(e.to_string()));
        }
        if !self.scenes.contains_key(&self.start) {
            issues.push(GraphIssue::MissingStart(self.start));
        }

        for scene in self.scenes.values() {
            for target in scene.successors().into_iter().filter_map(SceneTarget::scene) {
                if !self.scenes.contains_key(&target) {
                    issues.push(GraphIssue::DanglingTarget {
                        scene: scene.id,
                        target,
                    });
                }
            }

            match &scene.kind {
                SceneKind::Story { choices } => {
                    if choices.is_empty() {
                        issues.push(GraphIssue::EmptyScene(scene.id));
                    }
                    for (index, choice) in choices.iter().enumerate() {
                        if choice.next.is_some() {
                            continue;
                        }
                        if choice.next_by_stats.is_empty() {
                            issues.push(GraphIssue::NoSuccessor {
                                scene: scene.id,
                                choice: index,
                            });
                            continue;
                        }
                        let conditions: Vec<Condition> = choice
                            .next_by_stats
                            .iter()
                            .map(|b| b.condition.clone())
                            .collect();
                        if !Condition::covers_all(&conditions) {
                            issues.push(GraphIssue::NonExhaustiveBranches {
                                scene: scene.id,
                                choice: index,
                            });
                        }
                    }
                }
                SceneKind::Battle { enemy, .. } => {
                    if !self.enemies.contains(enemy) {
                        issues.push(GraphIssue::UnknownEnemy {
                            scene: scene.id,
                            enemy: enemy.clone(),
                        });
                    }
                }
            }
        }
        issues
    }

    /// Id of the first scene.
    pub fn start(&self) -> SceneId {
        self.start
    }

    /// Look up a scene.
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    /// Look up a scene, failing on unknown ids.
    pub fn require(&self, id: SceneId) -> StoryResult<&Scene> {
        self.get(id).ok_or(StoryError::UnknownScene(id))
    }

    /// The enemy roster.
    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    /// Scenes sorted by id.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> + '_ {
        self.scenes.values()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the graph has no scenes. Never true for a validated graph.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// `(chapter, title)` pairs in chapter order.
    pub fn chapters(&self) -> Vec<(u32, String)> {
        let mut seen = BTreeMap::new();
        for scene in self.scenes.values() {
            seen.entry(scene.chapter)
                .or_insert_with(|| scene.chapter_title.clone());
        }
        seen.into_iter().collect()
    }

    /// Scenes that cannot be reached from the start scene.
    pub fn unreachable(&self) -> Vec<SceneId> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([self.start]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(scene) = self.get(id) {
                queue.extend(scene.successors().into_iter().filter_map(SceneTarget::scene));
            }
        }
        self.scenes
            .keys()
            .filter(|id| !seen.contains(id))
            .copied()
            .collect()
    }

    /// Whether some path from the start scene reaches the ending.
    pub fn reaches_end(&self) -> bool {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([self.start]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let Some(scene) = self.get(id) else { continue };
            for target in scene.successors() {
                match target {
                    SceneTarget::End => return true,
                    SceneTarget::Scene(next) => queue.push_back(next),
                }
            }
        }
        false
    }
}
