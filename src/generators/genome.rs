//! Genome annotation and per-gene mutation samples.

use serde::Serialize;

use crate::reference::{GeneWindow, AMINO_ACIDS, GENES};
use crate::rng::RandomSource;

/// Mutations returned per request.
pub const MUTATION_COUNT: usize = 30;

/// Upper bound (exclusive) of a mutation's sample frequency.
pub const MAX_MUTATION_PCT: f64 = 0.9;

/// `/api/genome/genes` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenomeGenes {
    /// Gene windows in genome order.
    pub genes: Vec<GeneWindow>,
}

/// Sampled mutation inside one gene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation {
    /// Nucleotide position, inside the gene window.
    pub pos: u32,
    /// Gene name as requested by the client.
    pub gene: String,
    /// Three amino-acid letters.
    pub aa_change: String,
    /// Fraction of samples carrying the mutation, in `[0, 0.9)`.
    pub pct: f64,
}

/// `/api/genome/mutations` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenomeMutations {
    /// Sampled mutations.
    pub mutations: Vec<Mutation>,
}

/// The fixed genome annotation.
pub fn genes() -> GenomeGenes {
    GenomeGenes {
        genes: GENES.to_vec(),
    }
}

/// Sample [`MUTATION_COUNT`] mutations inside `window`, labelled `gene`.
///
/// The label is echoed as given, so an unknown gene keeps its name while
/// positions come from the fallback window.
pub fn mutations(rng: &mut impl RandomSource, window: GeneWindow, gene: &str) -> GenomeMutations {
    let mutations = (0..MUTATION_COUNT)
        .map(|_| {
            let pos = window.start + rng.next_below(window.span());
            let pct = rng.next_f64() * MAX_MUTATION_PCT;
            Mutation {
                pos,
                gene: gene.to_string(),
                aa_change: amino_acid_triplet(rng),
                pct,
            }
        })
        .collect();

    GenomeMutations { mutations }
}

fn amino_acid_triplet(rng: &mut impl RandomSource) -> String {
    (0..3)
        .map(|_| AMINO_ACIDS[rng.next_below(AMINO_ACIDS.len() as u32) as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{gene_label, resolve_gene};
    use crate::rng::testing::FixedSource;
    use crate::rng::SeededRng;
    use pretty_assertions::assert_eq;

    #[test]
    fn genes_match_annotation_table() {
        let payload = genes();
        assert_eq!(payload.genes.len(), 11);
        assert_eq!(payload.genes[0].name, "ORF1a");
        assert_eq!(payload.genes[10].name, "ORF10");
        assert_eq!(genes(), payload);
    }

    #[test]
    fn genes_serialize_name_start_end() {
        let json = serde_json::to_value(genes()).unwrap();
        assert_eq!(
            json["genes"][2],
            serde_json::json!({"name": "Spike", "start": 21563, "end": 25384})
        );
    }

    #[test]
    fn positions_stay_inside_every_gene() {
        let mut rng = SeededRng::default();
        for gene in GENES {
            let payload = mutations(&mut rng, gene, gene.name);
            assert_eq!(payload.mutations.len(), MUTATION_COUNT);
            for m in &payload.mutations {
                assert!(gene.contains(m.pos), "{} outside {}", m.pos, gene.name);
                assert_eq!(m.gene, gene.name);
            }
        }
    }

    #[test]
    fn window_edges_are_reachable() {
        let gene = resolve_gene(Some("ORF10")).0;

        let low = mutations(&mut FixedSource(0.0), gene, gene.name);
        assert!(low.mutations.iter().all(|m| m.pos == gene.start));

        let high = mutations(&mut FixedSource(0.999_999_9), gene, gene.name);
        assert!(high.mutations.iter().all(|m| m.pos == gene.end));
    }

    #[test]
    fn unknown_gene_samples_the_spike_window() {
        let requested = Some("not-a-gene");
        let (window, fell_back) = resolve_gene(requested);
        assert!(fell_back);

        let payload = mutations(&mut SeededRng::new(77), window, gene_label(requested));
        for m in &payload.mutations {
            assert!((21563..=25384).contains(&m.pos));
            assert_eq!(m.gene, "not-a-gene");
        }
    }

    #[test]
    fn missing_gene_is_labelled_spike() {
        for requested in [None, Some("")] {
            let (window, _) = resolve_gene(requested);
            let payload = mutations(&mut SeededRng::new(77), window, gene_label(requested));
            assert!(payload.mutations.iter().all(|m| m.gene == "Spike"));
        }
    }

    #[test]
    fn amino_acid_changes_and_pct_are_well_formed() {
        let payload = mutations(&mut SeededRng::new(3), GENES[9], "N");
        for m in &payload.mutations {
            assert_eq!(m.aa_change.chars().count(), 3);
            assert!(m.aa_change.chars().all(|c| AMINO_ACIDS.contains(&c)));
            assert!((0.0..MAX_MUTATION_PCT).contains(&m.pct));
        }
    }
}
