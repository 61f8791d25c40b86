use crate::engines::generation::genome::{Gene, Genome};
use rand::Rng;

/// Roulette wheel selection: probability proportional to fitness.
///
/// Draws once in `[0, total_fitness)` and walks the population until the
/// running sum exceeds the draw. A non-positive total selects the first
/// genome without consuming a draw.
pub fn roulette_selection<R: Rng>(population: &[Genome], total_fitness: f64, rng: &mut R) -> usize {
    if population.is_empty() || !total_fitness.is_finite() || total_fitness <= 0.0 {
        return 0;
    }

    let spin = rng.gen_range(0.0..total_fitness);
    let mut running = 0.0;

    for (idx, genome) in population.iter().enumerate() {
        running += genome.fitness.max(0.0);
        if running > spin {
            return idx;
        }
    }

    // Rounding left the spin just past the accumulated sum
    population
        .iter()
        .rposition(|g| g.fitness > 0.0)
        .unwrap_or(0)
}

/// Multi-point crossover: with probability `crossover_rate` walk both
/// parents and swap each gene position with probability `swap_rate`.
/// Otherwise, or when the parents are identical, the children are copies.
pub fn crossover<R: Rng>(
    mum: &[Gene],
    dad: &[Gene],
    crossover_rate: f64,
    swap_rate: f64,
    rng: &mut R,
) -> (Vec<Gene>, Vec<Gene>) {
    let mut baby1 = mum.to_vec();
    let mut baby2 = dad.to_vec();

    if rng.gen::<f64>() >= crossover_rate || mum == dad {
        return (baby1, baby2);
    }

    let len = baby1.len().min(baby2.len());
    for i in 0..len {
        if rng.gen::<f64>() < swap_rate {
            std::mem::swap(&mut baby1[i], &mut baby2[i]);
        }
    }

    (baby1, baby2)
}

/// Mutation: replace each gene with a fresh random one with probability `mutation_rate`
pub fn mutate<R: Rng>(genes: &mut [Gene], mutation_rate: f64, max_duration: u32, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = Gene::random(max_duration, rng);
        }
    }
}

/// Generate a random starting population
pub fn random_population<R: Rng>(
    size: usize,
    chromosome_length: usize,
    max_duration: u32,
    rng: &mut R,
) -> Vec<Genome> {
    (0..size)
        .map(|_| Genome::random(chromosome_length, max_duration, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(fitness: &[f64]) -> Vec<Genome> {
        fitness
            .iter()
            .map(|&f| Genome {
                genes: vec![Gene::new(Action::None, 1)],
                fitness: f,
            })
            .collect()
    }

    fn parents(rng: &mut StdRng) -> (Vec<Gene>, Vec<Gene>) {
        let mum = Genome::random(20, 30, rng).genes;
        let dad = Genome::random(20, 30, rng).genes;
        (mum, dad)
    }

    #[test]
    fn test_roulette_never_picks_zero_fitness() {
        let population = scored(&[0.0, 5.0, 0.0, 1.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5000 {
            let idx = roulette_selection(&population, 6.0, &mut rng);
            assert!(idx == 1 || idx == 3, "picked zero-fitness genome {}", idx);
        }
    }

    #[test]
    fn test_roulette_is_fitness_proportional() {
        let population = scored(&[1.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(3);
        let picks = (0..10_000)
            .filter(|_| roulette_selection(&population, 4.0, &mut rng) == 1)
            .count();
        // expected 7500
        assert!((7000..8000).contains(&picks), "picked the fitter genome {} times", picks);
    }

    #[test]
    fn test_roulette_zero_total_falls_back_to_first() {
        let population = scored(&[0.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(1);
        let untouched = rng.clone();
        assert_eq!(roulette_selection(&population, 0.0, &mut rng), 0);
        // no draw consumed
        assert_eq!(rng.gen::<u64>(), untouched.clone().gen::<u64>());
    }

    #[test]
    fn test_roulette_overrun_picks_last_positive() {
        let population = scored(&[2.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(5);
        // total overstated so some spins land beyond the accumulated sum
        for _ in 0..100 {
            assert_eq!(roulette_selection(&population, 10.0, &mut rng), 0);
        }
    }

    #[test]
    fn test_crossover_rate_zero_copies_parents() {
        let mut rng = StdRng::seed_from_u64(21);
        let (mum, dad) = parents(&mut rng);
        let (a, b) = crossover(&mum, &dad, 0.0, 0.5, &mut rng);
        assert_eq!(a, mum);
        assert_eq!(b, dad);
    }

    #[test]
    fn test_crossover_rate_one_is_reproducible_swap() {
        let mut rng = StdRng::seed_from_u64(21);
        let (mum, dad) = parents(&mut rng);

        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        let (a1, b1) = crossover(&mum, &dad, 1.0, 0.5, &mut first);
        let (a2, b2) = crossover(&mum, &dad, 1.0, 0.5, &mut second);
        assert_eq!((&a1, &b1), (&a2, &b2));

        // every position holds the two parent genes, possibly swapped
        for i in 0..mum.len() {
            let kept = a1[i] == mum[i] && b1[i] == dad[i];
            let swapped = a1[i] == dad[i] && b1[i] == mum[i];
            assert!(kept || swapped);
        }
        assert_ne!(a1, mum, "a half swap rate over 20 genes should move something");
    }

    #[test]
    fn test_crossover_swap_rate_one_exchanges_everything() {
        let mut rng = StdRng::seed_from_u64(4);
        let (mum, dad) = parents(&mut rng);
        let (a, b) = crossover(&mum, &dad, 1.0, 1.0, &mut rng);
        assert_eq!(a, dad);
        assert_eq!(b, mum);
    }

    #[test]
    fn test_mutation_rate_zero_keeps_genes() {
        let mut rng = StdRng::seed_from_u64(8);
        let original = Genome::random(50, 30, &mut rng).genes;
        let mut genes = original.clone();
        mutate(&mut genes, 0.0, 30, &mut rng);
        assert_eq!(genes, original);
    }

    #[test]
    fn test_mutation_rate_one_redraws_everything() {
        let mut rng = StdRng::seed_from_u64(8);
        let original = Genome::random(50, 30, &mut rng).genes;

        let mut first = original.clone();
        mutate(&mut first, 1.0, 30, &mut StdRng::seed_from_u64(1));
        let mut second = original.clone();
        mutate(&mut second, 1.0, 30, &mut StdRng::seed_from_u64(2));

        assert_ne!(first, original);
        assert_ne!(first, second);
        assert!(first.iter().all(|g| (1..=30).contains(&g.duration)));
    }

    #[test]
    fn test_random_population_shape() {
        let mut rng = StdRng::seed_from_u64(0);
        let population = random_population(10, 5, 30, &mut rng);
        assert_eq!(population.len(), 10);
        assert!(population.iter().all(|g| g.genes.len() == 5));
    }
}
