use crate::engines::generation::genome::Gene;
use crate::types::Action;

/// Expands genes into one action per tick: each gene's action repeated
/// `duration` times, in gene order.
pub fn decode(genes: &[Gene]) -> Vec<Action> {
    let ticks: usize = genes.iter().map(|g| g.duration as usize).sum();
    let mut actions = Vec::with_capacity(ticks);
    for gene in genes {
        actions.extend(std::iter::repeat(gene.action).take(gene.duration as usize));
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_repeats_in_order() {
        let genes = vec![
            Gene::new(Action::Thrust, 2),
            Gene::new(Action::RotateLeft, 1),
            Gene::new(Action::None, 3),
        ];
        assert_eq!(
            decode(&genes),
            vec![
                Action::Thrust,
                Action::Thrust,
                Action::RotateLeft,
                Action::None,
                Action::None,
                Action::None,
            ]
        );
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(&[]).is_empty());
    }
}
