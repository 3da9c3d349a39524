//! Maze session state
//!
//! A session owns exactly one maze instance at a time together with the
//! handles of the bodies realizing it in the physics world. Phases:
//! `Playing` until the ball overlaps the goal, then `Won` until replay.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::carve::Maze;
use super::input::{Nudge, apply_nudge};
use super::layout::{MazeLayout, WallKind, export_layout};
use super::world::{BodyHandle, BodyTag, PhysicsWorld};
use crate::error::Result;
use crate::settings::MazeConfig;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball is being steered toward the goal
    Playing,
    /// Goal reached, waiting for replay
    Won,
}

/// Effects the host should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reached the goal; show the win banner
    GoalReached,
}

/// Bodies created for one maze instance
#[derive(Debug, Clone)]
struct MazeBodies {
    walls: Vec<(BodyHandle, WallKind)>,
    ball: BodyHandle,
    goal: BodyHandle,
}

/// One playable maze plus its realization in a physics world
#[derive(Debug, Clone)]
pub struct MazeSession {
    config: MazeConfig,
    /// Seed stream for successive mazes
    rng: Pcg32,
    phase: GamePhase,
    maze: Maze,
    layout: MazeLayout,
    bodies: MazeBodies,
    /// Win check only fires while armed
    armed: bool,
    /// Incremented for every maze instance built
    generation: u32,
}

impl MazeSession {
    /// Build the first maze and realize it in `world`
    pub fn new<W: PhysicsWorld>(config: MazeConfig, seed: u64, world: &mut W) -> Result<Self> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let (maze, layout) = build(&config, rng.next_u64())?;

        world.set_gravity(Vec2::ZERO);
        let walls = insert_walls(world, &layout);
        let goal = world.create_static_rect(layout.goal, layout.goal_size(), BodyTag::Goal);
        let ball = world.create_dynamic_circle(layout.start, config.ball_radius(), BodyTag::Ball);

        log::info!(
            "Maze #1 ready: {}x{}, seed {}, {} walls",
            config.rows,
            config.columns,
            maze.seed,
            walls.len()
        );

        Ok(Self {
            config,
            rng,
            phase: GamePhase::Playing,
            maze,
            layout,
            bodies: MazeBodies { walls, ball, goal },
            armed: true,
            generation: 1,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn ball(&self) -> BodyHandle {
        self.bodies.ball
    }

    pub fn goal(&self) -> BodyHandle {
        self.bodies.goal
    }

    /// Handles of the current wall bodies
    pub fn wall_handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies.walls.iter().map(|(handle, _)| *handle)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// True when `a` and `b` are the ball and goal, in either order
    pub fn is_goal_contact(&self, a: BodyHandle, b: BodyHandle) -> bool {
        let MazeBodies { ball, goal, .. } = self.bodies;
        (a == ball && b == goal) || (a == goal && b == ball)
    }

    /// Feed an overlap-start notification from the physics world
    ///
    /// Transitions `Playing → Won` at most once per maze instance and applies
    /// the configured post-win effects.
    pub fn on_overlap_start<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<GameEvent> {
        if !self.armed || self.phase != GamePhase::Playing || !self.is_goal_contact(a, b) {
            return None;
        }
        self.armed = false;
        self.phase = GamePhase::Won;
        log::info!("Maze #{} solved", self.generation);

        if let Some(gravity) = self.config.post_win_gravity {
            world.set_gravity(Vec2::new(0.0, gravity));
        }
        if self.config.post_win_relaxation {
            let inner = self
                .bodies
                .walls
                .iter()
                .filter(|(_, kind)| *kind != WallKind::Boundary);
            for (handle, _) in inner {
                world.set_body_static(*handle, false);
            }
            world.set_body_static(self.bodies.goal, false);
            log::debug!("Maze #{} relaxed", self.generation);
        }
        Some(GameEvent::GoalReached)
    }

    /// Replace the current maze with a freshly generated one
    ///
    /// The new maze and its geometry are fully built before the world is
    /// touched, so the world never holds a mix of old and new walls.
    pub fn replay<W: PhysicsWorld>(&mut self, world: &mut W) -> Result<()> {
        let (maze, layout) = build(&self.config, self.rng.next_u64())?;
        self.armed = false;

        let old: Vec<BodyHandle> = self.wall_handles().collect();
        world.remove_bodies(&old);
        world.set_gravity(Vec2::ZERO);
        let walls = insert_walls(world, &layout);

        let MazeBodies { ball, goal, .. } = self.bodies;
        world.set_position(ball, layout.start);
        world.set_velocity(ball, Vec2::ZERO);
        world.set_body_static(goal, true);
        world.set_position(goal, layout.goal);
        world.set_velocity(goal, Vec2::ZERO);

        self.bodies.walls = walls;
        self.maze = maze;
        self.layout = layout;
        self.generation += 1;
        self.phase = GamePhase::Playing;
        self.armed = true;

        log::info!(
            "Maze #{} ready: seed {}, {} walls",
            self.generation,
            self.maze.seed,
            self.bodies.walls.len()
        );
        Ok(())
    }

    /// Apply a directional velocity bump to the ball
    pub fn nudge<W: PhysicsWorld>(&self, world: &mut W, nudge: Nudge) {
        let ball = self.bodies.ball;
        let vel = apply_nudge(
            world.velocity(ball),
            nudge,
            self.config.velocity_bump,
            self.config.velocity_cap,
        );
        world.set_velocity(ball, vel);
    }
}

/// Generate and export one maze instance without touching any world
fn build(config: &MazeConfig, seed: u64) -> Result<(Maze, MazeLayout)> {
    let maze = Maze::generate(config.rows, config.columns, seed)?;
    let layout = export_layout(&maze.walls, config.unit(), config.wall_thickness);
    Ok((maze, layout))
}

fn insert_walls<W: PhysicsWorld>(
    world: &mut W,
    layout: &MazeLayout,
) -> Vec<(BodyHandle, WallKind)> {
    layout
        .walls
        .iter()
        .map(|wall| {
            let handle = world.create_static_rect(wall.center, wall.size, BodyTag::Wall);
            (handle, wall.kind)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::settings::MazePreset;
    use crate::sim::world::HeadlessWorld;

    fn session(preset: MazePreset) -> (MazeSession, HeadlessWorld) {
        let mut world = HeadlessWorld::new();
        let session = MazeSession::new(MazeConfig::from_preset(preset), 12345, &mut world).unwrap();
        (session, world)
    }

    #[test]
    fn test_new_realizes_maze() {
        let (session, world) = session(MazePreset::Compact);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.maze().walls.is_perfect());
        assert_eq!(world.count_tagged(BodyTag::Wall), session.layout().walls.len());
        assert_eq!(world.count_tagged(BodyTag::Goal), 1);
        assert_eq!(world.count_tagged(BodyTag::Ball), 1);

        let ball = world.body(session.ball()).unwrap();
        assert_eq!(ball.pos, session.layout().start);
        let goal = world.body(session.goal()).unwrap();
        assert!(goal.is_static);
        assert_eq!(goal.pos, session.layout().goal);
    }

    #[test]
    fn test_invalid_config_builds_nothing() {
        let mut world = HeadlessWorld::new();
        let mut config = MazeConfig::default();
        config.columns = 0;
        let result = MazeSession::new(config, 1, &mut world);
        assert!(matches!(result, Err(MazeError::InvalidDimensions { .. })));
        assert!(world.is_empty());
    }

    #[test]
    fn test_goal_contact_in_either_order() {
        let (mut session, mut world) = session(MazePreset::Compact);
        let (ball, goal) = (session.ball(), session.goal());
        assert!(session.is_goal_contact(ball, goal));
        assert!(session.is_goal_contact(goal, ball));

        assert_eq!(
            session.on_overlap_start(&mut world, goal, ball),
            Some(GameEvent::GoalReached)
        );
        assert!(session.is_won());
    }

    #[test]
    fn test_other_pairs_are_ignored() {
        let (mut session, mut world) = session(MazePreset::Compact);
        let wall = session.wall_handles().next().unwrap();
        let (ball, goal) = (session.ball(), session.goal());

        assert_eq!(session.on_overlap_start(&mut world, ball, wall), None);
        assert_eq!(session.on_overlap_start(&mut world, wall, goal), None);
        assert_eq!(session.on_overlap_start(&mut world, ball, ball), None);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_win_fires_once() {
        let (mut session, mut world) = session(MazePreset::Compact);
        let (ball, goal) = (session.ball(), session.goal());
        assert!(session.on_overlap_start(&mut world, ball, goal).is_some());
        assert!(session.on_overlap_start(&mut world, ball, goal).is_none());
    }

    #[test]
    fn test_gravity_only_post_win() {
        let (mut session, mut world) = session(MazePreset::Classic);
        let (ball, goal) = (session.ball(), session.goal());
        session.on_overlap_start(&mut world, ball, goal);

        assert_eq!(world.gravity(), Vec2::new(0.0, crate::consts::POST_WIN_GRAVITY));
        // Geometry stays put without relaxation
        assert!(world.bodies().iter().filter(|b| b.tag == BodyTag::Wall).all(|b| b.is_static));
        assert!(world.body(goal).unwrap().is_static);
    }

    #[test]
    fn test_relaxation_frees_inner_walls_and_goal() {
        let (mut session, mut world) = session(MazePreset::Collapse);
        let (ball, goal) = (session.ball(), session.goal());
        session.on_overlap_start(&mut world, ball, goal);

        for (handle, kind) in session.bodies.walls.iter() {
            let body = world.body(*handle).unwrap();
            assert_eq!(body.is_static, *kind == WallKind::Boundary);
        }
        assert!(!world.body(goal).unwrap().is_static);
    }

    #[test]
    fn test_compact_has_no_post_win_effect() {
        let (mut session, mut world) = session(MazePreset::Compact);
        let (ball, goal) = (session.ball(), session.goal());
        session.on_overlap_start(&mut world, ball, goal);
        assert_eq!(world.gravity(), Vec2::ZERO);
        assert!(world.body(goal).unwrap().is_static);
    }

    #[test]
    fn test_replay_supersedes_previous_maze() {
        let (mut session, mut world) = session(MazePreset::Collapse);
        let (ball, goal) = (session.ball(), session.goal());
        session.on_overlap_start(&mut world, ball, goal);
        world.step(1.0);

        let old_walls: Vec<_> = session.wall_handles().collect();
        let old_seed = session.maze().seed;
        session.replay(&mut world).unwrap();

        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.generation(), 2);
        assert_ne!(session.maze().seed, old_seed);
        assert!(session.maze().walls.is_perfect());
        assert!(old_walls.iter().all(|h| world.body(*h).is_none()));
        assert!(session.wall_handles().all(|h| !old_walls.contains(&h)));
        assert_eq!(world.count_tagged(BodyTag::Wall), session.layout().walls.len());

        // Ball and goal reset in place
        let ball_body = world.body(ball).unwrap();
        assert_eq!(ball_body.pos, session.layout().start);
        assert_eq!(ball_body.vel, Vec2::ZERO);
        let goal_body = world.body(goal).unwrap();
        assert!(goal_body.is_static);
        assert_eq!(goal_body.pos, session.layout().goal);
        assert_eq!(world.gravity(), Vec2::ZERO);
    }

    #[test]
    fn test_replay_rearms_win_check() {
        let (mut session, mut world) = session(MazePreset::Compact);
        let (ball, goal) = (session.ball(), session.goal());
        session.on_overlap_start(&mut world, ball, goal);
        session.replay(&mut world).unwrap();
        assert_eq!(
            session.on_overlap_start(&mut world, ball, goal),
            Some(GameEvent::GoalReached)
        );
    }

    #[test]
    fn test_repeated_replay_never_mixes_wall_sets() {
        let (mut session, mut world) = session(MazePreset::Wide);
        for _ in 0..5 {
            session.replay(&mut world).unwrap();
            assert_eq!(world.count_tagged(BodyTag::Wall), session.layout().walls.len());
        }
        assert_eq!(session.generation(), 6);
    }

    #[test]
    fn test_same_seed_same_mazes() {
        let (mut a, mut wa) = session(MazePreset::Dense);
        let (mut b, mut wb) = session(MazePreset::Dense);
        assert_eq!(a.maze().walls, b.maze().walls);
        a.replay(&mut wa).unwrap();
        b.replay(&mut wb).unwrap();
        assert_eq!(a.maze().walls, b.maze().walls);
    }

    #[test]
    fn test_nudge_respects_cap() {
        let (session, mut world) = session(MazePreset::Wide);
        for _ in 0..10 {
            session.nudge(&mut world, Nudge::Right);
        }
        let vel = world.velocity(session.ball());
        assert!((vel.length() - 8.0).abs() < 1e-4);

        session.nudge(&mut world, Nudge::Up);
        assert!(world.velocity(session.ball()).y < 0.0);
    }

    fn step_events(session: &mut MazeSession, world: &mut HeadlessWorld) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for (a, b) in world.step(crate::consts::SIM_DT) {
            events.extend(session.on_overlap_start(world, a, b));
        }
        events
    }

    #[test]
    fn test_single_cell_maze_wins_again_after_replay() {
        // Start and goal share the only cell, so the ball sits on the goal
        let mut world = HeadlessWorld::new();
        let config = MazeConfig::fit(1, 1, 100.0, 100.0);
        let mut session = MazeSession::new(config, 3, &mut world).unwrap();

        assert_eq!(step_events(&mut session, &mut world), vec![GameEvent::GoalReached]);
        session.replay(&mut world).unwrap();

        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(step_events(&mut session, &mut world));
        }
        assert_eq!(events, vec![GameEvent::GoalReached]);
        assert!(session.is_won());
    }

    #[test]
    fn test_driving_ball_onto_goal_wins() {
        let (mut session, mut world) = session(MazePreset::Compact);
        let goal_center = session.layout().goal;
        world.set_position(session.ball(), goal_center);

        let mut events = Vec::new();
        for (a, b) in world.step(0.0) {
            events.extend(session.on_overlap_start(&mut world, a, b));
        }
        assert_eq!(events, vec![GameEvent::GoalReached]);
    }
}
