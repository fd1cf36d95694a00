//! Flatland: a toroidal grid of food and poison that an agent network walks.
//!
//! The agent senses the three cells to its left, front and right (food and
//! poison separately, six inputs) and picks one of three moves from the
//! network's three outputs. A scenario owns only its initial layout; every
//! trial plays out on a private copy of the board.

use super::network::FeedForwardNet;
use super::{Scenario, ScenarioGenerator, TrialScore};
use crate::error::{NeuroevoError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const SENSOR_COUNT: usize = 6;
pub const ACTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Food,
    Poison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn turn_left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }
}

/// Agent state after one step of a recorded trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
    pub board: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flatland {
    dimension: usize,
    board: Vec<Cell>,
    start: (usize, usize),
    heading: Heading,
    steps: usize,
}

impl Flatland {
    pub const DEFAULT_STEPS: usize = 60;

    /// Random layout: each cell is food with `food_probability`, otherwise
    /// poison with `poison_probability`. The start cell is always empty.
    pub fn new<R: Rng>(
        dimension: usize,
        food_probability: f64,
        poison_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        validate_layout_params(dimension, food_probability, poison_probability)?;

        let mut board: Vec<Cell> = (0..dimension * dimension)
            .map(|_| {
                if rng.gen::<f64>() < food_probability {
                    Cell::Food
                } else if rng.gen::<f64>() < poison_probability {
                    Cell::Poison
                } else {
                    Cell::Empty
                }
            })
            .collect();

        let start = (rng.gen_range(0..dimension), rng.gen_range(0..dimension));
        board[start.1 * dimension + start.0] = Cell::Empty;

        Ok(Self {
            dimension,
            board,
            start,
            heading: Heading::North,
            steps: Self::DEFAULT_STEPS,
        })
    }

    /// Fixed layout, row-major with `board[y * dimension + x]`
    pub fn from_layout(
        dimension: usize,
        board: Vec<Cell>,
        start: (usize, usize),
        heading: Heading,
    ) -> Result<Self> {
        if dimension == 0 || board.len() != dimension * dimension {
            return Err(NeuroevoError::Scenario(format!(
                "Board of {} cells does not fit dimension {}",
                board.len(),
                dimension
            )));
        }
        if start.0 >= dimension || start.1 >= dimension {
            return Err(NeuroevoError::Scenario(format!(
                "Start {:?} outside {}x{} grid",
                start, dimension, dimension
            )));
        }
        Ok(Self {
            dimension,
            board,
            start,
            heading,
            steps: Self::DEFAULT_STEPS,
        })
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board[y * self.dimension + x]
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.board.iter().filter(|&&c| c == kind).count()
    }

    pub fn score_agent_steps(&self, net: &FeedForwardNet, steps: usize) -> Result<TrialScore> {
        self.run_trial(net, steps, None)
    }

    /// Run a trial and keep a snapshot of the initial state and every step
    pub fn record_agent(
        &self,
        net: &FeedForwardNet,
        steps: usize,
    ) -> Result<(TrialScore, Vec<Snapshot>)> {
        let mut recording = Vec::with_capacity(steps + 1);
        let score = self.run_trial(net, steps, Some(&mut recording))?;
        Ok((score, recording))
    }

    fn run_trial(
        &self,
        net: &FeedForwardNet,
        steps: usize,
        mut recording: Option<&mut Vec<Snapshot>>,
    ) -> Result<TrialScore> {
        let topology = net.topology();
        if topology.input_size() != SENSOR_COUNT || topology.output_size() != ACTION_COUNT {
            return Err(NeuroevoError::Scenario(format!(
                "Flatland agents need {} inputs and {} outputs, network has {} and {}",
                SENSOR_COUNT,
                ACTION_COUNT,
                topology.input_size(),
                topology.output_size()
            )));
        }

        let mut board = self.board.clone();
        let (mut x, mut y) = self.start;
        let mut heading = self.heading;
        let mut score = TrialScore::default();

        if let Some(rec) = recording.as_deref_mut() {
            rec.push(Snapshot {
                x,
                y,
                heading,
                board: board.clone(),
            });
        }

        for _ in 0..steps {
            let headings = [heading.turn_left(), heading, heading.turn_right()];
            let seen: Vec<Cell> = headings
                .iter()
                .map(|&h| {
                    let (nx, ny) = self.step_from(x, y, h);
                    board[ny * self.dimension + nx]
                })
                .collect();

            let mut inputs = [0.0; SENSOR_COUNT];
            for (i, cell) in seen.iter().enumerate() {
                match cell {
                    Cell::Food => inputs[i] = 1.0,
                    Cell::Poison => inputs[i + ACTION_COUNT] = 1.0,
                    Cell::Empty => {}
                }
            }

            let outputs = net.forward(&inputs)?;
            let action = argmax(&outputs);

            heading = headings[action];
            (x, y) = self.step_from(x, y, heading);

            let cell = &mut board[y * self.dimension + x];
            match cell {
                Cell::Food => score.food += 1.0,
                Cell::Poison => score.poison += 1.0,
                Cell::Empty => {}
            }
            *cell = Cell::Empty;

            if let Some(rec) = recording.as_deref_mut() {
                rec.push(Snapshot {
                x,
                y,
                heading,
                board: board.clone(),
            });
            }
        }

        Ok(score)
    }

    fn step_from(&self, x: usize, y: usize, heading: Heading) -> (usize, usize) {
        let (dx, dy) = heading.delta();
        let dim = self.dimension as isize;
        (
            (x as isize + dx).rem_euclid(dim) as usize,
            (y as isize + dy).rem_euclid(dim) as usize,
        )
    }
}

impl Scenario for Flatland {
    fn score_agent(&self, net: &FeedForwardNet) -> Result<TrialScore> {
        self.run_trial(net, self.steps, None)
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn validate_layout_params(
    dimension: usize,
    food_probability: f64,
    poison_probability: f64,
) -> Result<()> {
    if dimension == 0 {
        return Err(NeuroevoError::Configuration(
            "Grid dimension must be positive".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&food_probability) || !(0.0..=1.0).contains(&poison_probability) {
        return Err(NeuroevoError::Configuration(
            "Food and poison probabilities must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

/// Produces fresh random Flatland layouts
pub struct FlatlandGenerator {
    dimension: usize,
    food_probability: f64,
    poison_probability: f64,
    steps: usize,
    rng: StdRng,
}

impl FlatlandGenerator {
    pub fn new(
        dimension: usize,
        food_probability: f64,
        poison_probability: f64,
        steps: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        validate_layout_params(dimension, food_probability, poison_probability)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            dimension,
            food_probability,
            poison_probability,
            steps,
            rng,
        })
    }
}

impl ScenarioGenerator for FlatlandGenerator {
    type Scenario = Flatland;

    fn generate(&mut self) -> Result<Flatland> {
        Flatland::new(
            self.dimension,
            self.food_probability,
            self.poison_probability,
            &mut self.rng,
        )
        .map(|scenario| scenario.with_steps(self.steps))
    }
}
