//! Hill-climbing key search for substitution ciphers
//!
//! A key is a permutation of the alphabet: `key[i]` is the plain letter for
//! cipher letter `'A' + i`. The climber starts from a random key, repeatedly
//! evaluates a few mutated neighbours and moves to the best one if it scores
//! higher. When a trajectory goes `regen_after` iterations without a new best,
//! it restarts from a fresh random key and a new generation begins.
//!
//! Every improvement is offered to a bounded [`Archive`] of the best keys seen
//! across all generations.

use super::control::SearchControl;
use crate::config::HillclimbConfig;
use crate::core::letters::{ALPHABET, ALPHABET_LEN, letter_index};
use crate::core::letters_only;
use crate::ngrams::FrequencyModel;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace};

/// Plain letter for each cipher letter, in cipher-letter order
pub type Key = [u8; ALPHABET_LEN];

/// A key and the fitness of the text it produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub key: Key,
    pub fitness: f64,
}

impl Candidate {
    /// Score `key` against upper case cipher letters
    #[must_use]
    pub fn evaluate(key: Key, cipher_letters: &[u8], model: &FrequencyModel) -> Self {
        let plain: Vec<u8> = cipher_letters.iter().map(|&c| substitute(c, &key)).collect();
        Self {
            key,
            fitness: model.fitness_of_letters(&plain),
        }
    }

    /// The key as a 26 letter string
    #[must_use]
    pub fn key_string(&self) -> String {
        self.key.iter().map(|&b| char::from(b)).collect()
    }
}

/// Best candidates seen so far, sorted by fitness descending
#[derive(Debug, Clone)]
pub struct Archive {
    capacity: usize,
    candidates: Vec<Candidate>,
}

impl Archive {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            candidates: Vec::with_capacity(capacity),
        }
    }

    /// Offer a candidate; returns whether it was kept
    ///
    /// A full archive only takes a candidate that beats its worst entry, which
    /// is then evicted. Keys already in the archive are ignored.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if self.candidates.iter().any(|c| c.key == candidate.key) {
            return false;
        }

        if self.candidates.len() < self.capacity {
            self.candidates.push(candidate);
        } else {
            match self.candidates.last_mut() {
                Some(worst) if candidate.fitness > worst.fitness => *worst = candidate,
                _ => return false,
            }
        }
        self.candidates
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}

/// One ranked result of a hill-climbing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HillclimbSolution {
    pub fitness: f64,
    pub key: String,
    pub plaintext: String,
}

/// A uniformly random permutation of the alphabet
#[must_use]
pub fn random_key<R: Rng + ?Sized>(rng: &mut R) -> Key {
    let mut key = ALPHABET;
    key.shuffle(rng);
    key
}

/// A copy of `key` with `swaps` random pairwise swaps applied
///
/// A swap may pick the same position twice, in which case it does nothing.
#[must_use]
pub fn mutate_key<R: Rng + ?Sized>(key: &Key, swaps: usize, rng: &mut R) -> Key {
    let mut mutated = *key;
    for _ in 0..swaps {
        let first = rng.random_range(0..ALPHABET_LEN);
        let second = rng.random_range(0..ALPHABET_LEN);
        mutated.swap(first, second);
    }
    mutated
}

/// Decipher `text` with `key`, upper casing letters and keeping everything else
#[must_use]
pub fn decipher_with_key(text: &str, key: &Key) -> String {
    text.bytes()
        .map(|b| char::from(substitute(b.to_ascii_uppercase(), key)))
        .collect()
}

fn substitute(cipher: u8, key: &Key) -> u8 {
    letter_index(cipher).map_or(cipher, |index| key[index])
}

/// Hill climber bound to one ciphertext and frequency model
pub struct HillClimber<'m> {
    model: &'m FrequencyModel,
    config: HillclimbConfig,
    cipher_letters: Vec<u8>,
}

impl<'m> HillClimber<'m> {
    #[must_use]
    pub fn new(ciphertext: &str, model: &'m FrequencyModel, config: &HillclimbConfig) -> Self {
        Self {
            model,
            config: *config,
            cipher_letters: letters_only(ciphertext).into_bytes(),
        }
    }

    /// Evaluate a key against this climber's ciphertext
    #[must_use]
    pub fn evaluate(&self, key: Key) -> Candidate {
        Candidate::evaluate(key, &self.cipher_letters, self.model)
    }

    /// One local-search step: the best of `local_lookaround` neighbours, or
    /// `current` itself if none of them scores higher
    pub fn step<R: Rng + ?Sized>(&self, current: &Candidate, rng: &mut R) -> Candidate {
        let mut best = *current;
        for _ in 0..self.config.local_lookaround {
            let neighbour = self.evaluate(mutate_key(&current.key, self.config.mutations, rng));
            if neighbour.fitness > best.fitness {
                best = neighbour;
            }
        }
        best
    }

    /// Run for the configured number of generations
    ///
    /// `on_generation` is called with the number of each generation that
    /// completes. The archive is returned even if `control` stops the run
    /// early.
    pub fn run<R, F>(&self, rng: &mut R, control: &SearchControl, mut on_generation: F) -> Archive
    where
        R: Rng + ?Sized,
        F: FnMut(usize),
    {
        let mut archive = Archive::new(self.config.candidate_count);

        let mut current = self.evaluate(random_key(rng));
        let mut best_of_generation = current;
        archive.offer(current);

        let mut stale = 1;
        let mut generation = 1;
        while generation <= self.config.generations {
            if control.is_cancelled() {
                debug!(generation, "hill climb cancelled");
                break;
            }

            if current.fitness > best_of_generation.fitness {
                best_of_generation = current;
                stale = 0;
                archive.offer(current);
            } else {
                stale += 1;
            }

            if stale > self.config.regen_after {
                trace!(generation, fitness = best_of_generation.fitness, "regenerating key");
                on_generation(generation);
                current = self.evaluate(random_key(rng));
                best_of_generation = current;
                stale = 0;
                generation += 1;
                continue;
            }

            current = self.step(&current, rng);
        }
        archive
    }

    /// Turn archived candidates into solutions with deciphered text
    #[must_use]
    pub fn solutions(ciphertext: &str, archive: Archive) -> Vec<HillclimbSolution> {
        archive
            .into_candidates()
            .into_iter()
            .map(|candidate| HillclimbSolution {
                fitness: candidate.fitness,
                key: candidate.key_string(),
                plaintext: decipher_with_key(ciphertext, &candidate.key),
            })
            .collect()
    }
}

/// Hill-climb a substitution key for `ciphertext`
///
/// Seeds a [`StdRng`] from `config.seed`, or from a random seed that is logged
/// so the run can be repeated. Results are sorted best first.
#[must_use]
pub fn solve_hillclimb<F: FnMut(usize)>(
    ciphertext: &str,
    model: &FrequencyModel,
    config: &HillclimbConfig,
    control: &SearchControl,
    on_generation: F,
) -> Vec<HillclimbSolution> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, generations = config.generations, "starting hill climb");

    let mut rng = StdRng::seed_from_u64(seed);
    let climber = HillClimber::new(ciphertext, model, config);
    let archive = climber.run(&mut rng, control, on_generation);
    HillClimber::solutions(ciphertext, archive)
}
