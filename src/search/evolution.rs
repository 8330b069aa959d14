//! Seeded genetic algorithm with an annealing polish.
//!
//! # Encoding
//! One gene per subject: the index of its chosen candidate. Every
//! chromosome is therefore a complete assignment.
//!
//! The initial population holds the greedy construction, the all-first
//! assignment (each subject's top-ranked candidate), and random
//! individuals. Generations use tournament selection, uniform
//! crossover, and reassignment mutation with elitism. The best
//! individual found is then polished by simulated annealing on
//! [`Score::energy`].
//!
//! All randomness comes from one `SmallRng` seeded from
//! [`SearchConfig::seed`], so runs are reproducible.
//!
//! # Reference
//! Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::greedy;
use super::problem::{Score, SearchProblem};
use super::progress::SearchMonitor;
use super::{SearchConfig, SearchOutcome, SearchStrategy};

const TOURNAMENT_SIZE: usize = 3;
const CROSSOVER_RATE: f64 = 0.9;
const ELITE_COUNT: usize = 2;
const INITIAL_TEMPERATURE: f64 = 50.0;
const COOLING_RATE: f64 = 0.995;
const MIN_TEMPERATURE: f64 = 1e-3;

/// A complete assignment and its score.
#[derive(Debug, Clone)]
struct Chromosome {
    genes: Vec<usize>,
    score: Score,
}

impl Chromosome {
    fn new(problem: &SearchProblem, genes: Vec<usize>) -> Self {
        let score = problem.score(&genes);
        Self { genes, score }
    }

    fn random<R: Rng>(problem: &SearchProblem, rng: &mut R) -> Self {
        let genes = (0..problem.subject_count())
            .map(|i| rng.random_range(0..problem.candidate_count(i)))
            .collect();
        Self::new(problem, genes)
    }
}

/// Best of `TOURNAMENT_SIZE` random picks.
fn tournament<'p, R: Rng>(population: &'p [Chromosome], rng: &mut R) -> &'p Chromosome {
    let mut winner = &population[rng.random_range(0..population.len())];
    for _ in 1..TOURNAMENT_SIZE {
        let rival = &population[rng.random_range(0..population.len())];
        if rival.score.is_better_than(&winner.score) {
            winner = rival;
        }
    }
    winner
}

/// Takes each gene from either parent with equal probability.
fn uniform_crossover<R: Rng>(a: &[usize], b: &[usize], rng: &mut R) -> Vec<usize> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| if rng.random_bool(0.5) { x } else { y })
        .collect()
}

/// Reassigns each gene to a random candidate with probability `rate`.
fn reassign_mutation<R: Rng>(genes: &mut [usize], problem: &SearchProblem, rng: &mut R, rate: f64) {
    for (i, gene) in genes.iter_mut().enumerate() {
        let k = problem.candidate_count(i);
        if k > 1 && rng.random_bool(rate) {
            *gene = rng.random_range(0..k);
        }
    }
}

/// Simulated annealing over single-gene moves. Returns the best
/// chromosome seen and whether a yield point asked to stop.
fn anneal<R: Rng>(
    problem: &SearchProblem,
    start: Chromosome,
    rng: &mut R,
    iterations: usize,
    monitor: &mut SearchMonitor<'_>,
) -> (Chromosome, bool) {
    let n = problem.subject_count();
    let mut current = start.clone();
    let mut best = start;
    let mut temperature = INITIAL_TEMPERATURE;

    for step in 0..iterations {
        let i = rng.random_range(0..n);
        let k = problem.candidate_count(i);
        if k > 1 {
            let a = rng.random_range(0..k);
            if a != current.genes[i] {
                let mut genes = current.genes.clone();
                genes[i] = a;
                let next = Chromosome::new(problem, genes);
                let delta = next.score.energy() - current.score.energy();
                if delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                    current = next;
                    if current.score.is_better_than(&best.score) {
                        best = current.clone();
                    }
                }
            }
        }
        temperature = (temperature * COOLING_RATE).max(MIN_TEMPERATURE);

        let explored = (step + 1) as f64 / iterations as f64;
        if monitor.tick(Some(best.score), explored).is_break() {
            return (best, true);
        }
    }
    (best, false)
}

pub(crate) fn evolve(
    problem: &SearchProblem,
    config: &SearchConfig,
    monitor: &mut SearchMonitor<'_>,
) -> SearchOutcome {
    let n = problem.subject_count();
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let size = config.population_size.max(ELITE_COUNT + 1);
    let mutation_rate = 1.0 / n.max(1) as f64;
    let total_children = (config.generations * (size - ELITE_COUNT)).max(1) as f64;

    let mut population = Vec::with_capacity(size);
    population.push(Chromosome::new(problem, greedy::construct(problem)));
    population.push(Chromosome::new(problem, vec![0; n]));
    while population.len() < size {
        population.push(Chromosome::random(problem, &mut rng));
    }

    let mut best = population[0].clone();
    for c in &population[1..] {
        if c.score.is_better_than(&best.score) {
            best = c.clone();
        }
    }

    let mut cancelled = false;
    let mut children = 0usize;
    'generations: for _ in 0..config.generations {
        if best.score.is_conflict_free() {
            break;
        }
        population.sort_by(|a, b| a.score.compare(&b.score));

        let mut next: Vec<Chromosome> = population[..ELITE_COUNT].to_vec();
        while next.len() < size {
            let a = tournament(&population, &mut rng);
            let b = tournament(&population, &mut rng);
            let mut genes = if rng.random_bool(CROSSOVER_RATE) {
                uniform_crossover(&a.genes, &b.genes, &mut rng)
            } else {
                a.genes.clone()
            };
            reassign_mutation(&mut genes, problem, &mut rng, mutation_rate);

            let child = Chromosome::new(problem, genes);
            if child.score.is_better_than(&best.score) {
                best = child.clone();
            }
            next.push(child);
            children += 1;

            if monitor
                .tick(Some(best.score), children as f64 / total_children)
                .is_break()
            {
                cancelled = true;
                break 'generations;
            }
        }
        population = next;
    }

    if !cancelled {
        let (polished, stopped) = anneal(problem, best.clone(), &mut rng, config.generations * n, monitor);
        cancelled = stopped;
        if polished.score.is_better_than(&best.score) {
            best = polished;
        }
    }

    SearchOutcome {
        choice: best.genes,
        score: best.score,
        strategy: SearchStrategy::Evolutionary,
        evaluations: monitor.evaluations(),
        complete: best.score.is_conflict_free(),
        cancelled,
    }
}
