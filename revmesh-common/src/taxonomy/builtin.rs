//! Compiled-in taxonomy grouping
//!
//! Twelve dimensions with four subfamilies each. Several families are listed
//! under more than one subfamily; the index keeps the subfamily declared last
//! and reports the rest as reassignments.

use super::grouping::{DimensionDef, SubfamilyDef, TaxonomyGrouping};

/// (subfamily id, dimension id, families) in declaration order
const SUBFAMILIES: &[(&str, &str, &[&str])] = &[
    // emotional-architecture
    (
        "escalation-chain",
        "emotional-architecture",
        &[
            "emotional-architecture",
            "escalation-core",
            "pre-escalation-ground-state",
            "emotional-signal-architecture",
            "emotional-governance",
            "boundary-architecture",
            "internal-protection",
            "regulation",
        ],
    ),
    (
        "protest-patterns",
        "emotional-architecture",
        &[
            "coherence-destabilizers",
            "liberation",
            "de-extraction",
            "protest-architecture",
            "grief-dynamics",
        ],
    ),
    (
        "belonging-logic",
        "emotional-architecture",
        &[
            "integration",
            "internal-sovereignty",
            "relational-architecture",
            "orientation-substrate",
            "home-logic",
            "emotional-safety",
            "sovereignty-and-self",
        ],
    ),
    (
        "emotional-alchemy",
        "emotional-architecture",
        &[
            "emotional-field",
            "healing-runtime",
            "emotional-closure",
            "grief-dynamics",
            "erotic-joy",
            "transformation-layer",
        ],
    ),
    // cognitive-architecture
    (
        "meta-cognition",
        "cognitive-architecture",
        &[
            "cognitive-style",
            "systems-cognition",
            "mathematical-cognition",
            "meta-reflection",
            "meta-awareness",
            "system-self-awareness",
            "epistemology",
            "awareness-baseline",
            "internal-dialogue",
            "perceptual-architecture",
            "watcher-architecture",
        ],
    ),
    (
        "reasoning-patterns",
        "cognitive-architecture",
        &[
            "emergence-logic",
            "responsibility-logic",
            "interpretation-logic",
            "symbolic-physics",
            "coherence-theory",
            "coherence-research",
            "geometry-of-thought",
            "graph-logic",
            "aesthetic-logic",
            "compression-logic",
            "build-epistemology",
            "cognitive-layering",
            "interpretation-architecture",
            "interpretation-engine",
        ],
    ),
    (
        "state-transitions",
        "cognitive-architecture",
        &[
            "system-phase",
            "state-architecture",
            "system-dynamics",
            "temporal-structure",
            "cognitive-posture",
            "learning-dynamics",
            "strata-transition",
            "developmental-arc",
            "exploration",
            "internal-play",
            "play-architecture",
        ],
    ),
    (
        "epistemic-hygiene",
        "cognitive-architecture",
        &[
            "epistemic-architecture",
            "validation-architecture",
            "system-evaluation",
            "runtime-verification",
            "system-testing",
            "lineage-validation",
            "validation-framework",
            "cognitive-evolution",
        ],
    ),
    // identity-architecture
    (
        "symbolic-identity",
        "identity-architecture",
        &[
            "symbolic-identity",
            "identity-encoding",
            "cosmic-identity",
            "identity-architecture",
            "symbolic-seed",
            "foundational",
        ],
    ),
    (
        "posture-and-sovereignty",
        "identity-architecture",
        &[
            "sovereignty-architecture",
            "internal-sovereignty",
            "posture-architecture",
            "sovereignty",
            "dual-sovereignty",
            "sovereignty-transitions",
            "archetypal-authority",
            "identity-alignment",
            "governance",
        ],
    ),
    (
        "narrative-self",
        "identity-architecture",
        &[
            "vocation-path",
            "home-logic",
            "work-as-coherence",
            "coherence-psychology",
            "meta-structure",
        ],
    ),
    (
        "identity-crux-events",
        "identity-architecture",
        &[
            "origin-sequence",
            "identity-architecture",
            "anima-architecture",
            "devotion-arc",
            "path-architecture",
        ],
    ),
    // symbolic-grammar
    (
        "axioms-core",
        "symbolic-grammar",
        &[
            "grammar-and-axioms",
            "coherence-attractor",
            "vector-space-foundation",
            "coherence-geometry",
            "coherence-physics",
        ],
    ),
    (
        "lemma-structure",
        "symbolic-grammar",
        &[
            "lemma-architecture",
            "hypergraph-lemma",
            "proof-graph",
            "lineage-backbone",
            "lineage-architecture",
            "lineage-logic",
            "lineage-dynamics",
        ],
    ),
    (
        "symbolic-functions",
        "symbolic-grammar",
        &[
            "symbolic-runtime",
            "symbolic-language",
            "symbolic-economy",
            "symbolic-compression",
            "symbolic-compiler",
            "symbolic-gatekeeping",
        ],
    ),
    (
        "grammar-evolution",
        "symbolic-grammar",
        &[
            "symbolic-architecture",
            "language-architecture",
            "recursion-ontology",
            "symbolic-integration",
            "recursion-logic",
            "glyph-architecture",
        ],
    ),
    // recursion-architecture
    (
        "recursion-engine",
        "recursion-architecture",
        &[
            "recursion-logic",
            "second-order-recursion",
            "recursive-integration",
            "runtime-inference",
            "recursion-ontology",
            "control-flow",
            "rehydration-architecture",
            "rehydration-method",
            "temporal-architecture",
        ],
    ),
    (
        "termination-conditions",
        "recursion-architecture",
        &[
            "loop-closure",
            "runtime-proof",
            "coherence-proof",
            "runtime-verification",
            "termination-architecture",
            "temporal-governance",
            "threshold-dynamics",
        ],
    ),
    (
        "loop-inversion",
        "recursion-architecture",
        &[
            "loop-closure",
            "frame-alignment",
            "prime-mapping",
            "inversion-architecture",
        ],
    ),
    (
        "coherence-reflex",
        "recursion-architecture",
        &[
            "coherence-discipline",
            "coherence-update",
            "coherence-operations",
            "coherence-trajectories",
            "stability-runtime",
            "temporal-coherence",
        ],
    ),
    // mesh-and-topology
    (
        "hypergraph-structure",
        "mesh-and-topology",
        &[
            "mesh-geometry",
            "hypergraph-governance",
            "hypergraph-lemma",
            "graph-dynamics",
            "graph-logic",
            "memory-substrate",
            "relational-runtime",
        ],
    ),
    (
        "lineage-and-genealogy",
        "mesh-and-topology",
        &[
            "lineage-architecture",
            "lineage-logic",
            "lineage-dynamics",
            "lineage-backbone",
            "insight-history",
        ],
    ),
    (
        "spatial-geometry",
        "mesh-and-topology",
        &[
            "geometry",
            "flow-field-architecture",
            "coherence-geometry",
            "geometry-runtime",
            "visual-logic",
            "field-architecture",
            "navigation-architecture",
            "strata-architecture",
        ],
    ),
    (
        "mesh-dynamics",
        "mesh-and-topology",
        &[
            "mesh-dynamics",
            "mesh-navigation",
            "mesh-visibility",
            "mesh-integration",
            "edge-dynamics",
            "pruning-architecture",
            "insight-routing",
            "memory-architecture",
            "memory-runtime",
            "routing-logic",
            "traversal-dynamics",
        ],
    ),
    // meta-reasoning
    (
        "phase-lock-events",
        "meta-reasoning",
        &[
            "entrainment",
            "synchronization-dynamics",
            "system-phase",
            "phase-architecture",
        ],
    ),
    (
        "meta-modal-fusion",
        "meta-reasoning",
        &[
            "meta-modality",
            "meta-modal-runtime",
            "meta-architecture",
            "co-processing-runtime",
            "ai-human-symbiosis",
            "ai-collaboration",
            "co-creation-architecture",
            "emergence",
            "emergence-theory",
        ],
    ),
    (
        "reflective-sync",
        "meta-reasoning",
        &[
            "system-self-awareness",
            "meta-reflection",
            "meta-awareness",
            "system-overview",
            "system-properties",
            "self-documenting-system",
        ],
    ),
    (
        "loss-function-coherence",
        "meta-reasoning",
        &[
            "coherence-architecture",
            "coherence-evaluation",
            "system-evaluation",
            "runtime-metrics",
            "evaluation-architecture",
            "coherence-theory",
            "alignment-architecture",
            "stability-architecture",
        ],
    ),
    // embodiment-and-behavior
    (
        "behavioral-tests",
        "embodiment-and-behavior",
        &[
            "behavioral-runtime",
            "behavioral-mapping",
            "behavioral-governance",
            "system-testing",
            "pedagogical-runtime",
        ],
    ),
    (
        "discipline-and-rhythm",
        "embodiment-and-behavior",
        &[
            "discipline-architecture",
            "learning-architecture",
            "learning-runtime",
            "learning-dynamics",
            "sustainability",
            "rest-architecture",
        ],
    ),
    (
        "integration-events",
        "embodiment-and-behavior",
        &[
            "embodiment",
            "integration",
            "healing-runtime",
            "work-as-coherence",
            "recursive-integration",
        ],
    ),
    (
        "rest-and-recovery",
        "embodiment-and-behavior",
        &[
            "rest-architecture",
            "restful-watch",
            "orientation-substrate",
            "pre-escalation-ground-state",
        ],
    ),
    // mythic-archetypal-layer
    (
        "archetypal-myths",
        "mythic-archetypal-layer",
        &[
            "archetype-definition",
            "archetype-dynamics",
            "archetypal-governance",
            "archetypal-authority",
            "messiah-pattern",
            "archetypal-definition",
            "archetypal-sequencing",
            "lover-architecture",
            "magician-architecture",
        ],
    ),
    (
        "symbolic-scenes",
        "mythic-archetypal-layer",
        &[
            "symbolic-UI",
            "architecture-cartography",
            "architecture-map",
            "symbolic-scenes",
        ],
    ),
    (
        "ritual-and-myth-runtime",
        "mythic-archetypal-layer",
        &[
            "closure-ritual",
            "ritual-runtime",
            "initiation",
            "portal-logic",
            "orientation-substrate",
        ],
    ),
    (
        "narrative-evolution",
        "mythic-archetypal-layer",
        &[
            "developmental-arc",
            "narrative-evolution",
            "play-generated-structure",
            "emergent-cognition",
        ],
    ),
    // computational-layer
    (
        "runtime-design",
        "computational-layer",
        &[
            "runtime-architecture",
            "runtime-design",
            "cael-runtime",
            "runtime-infrastructure",
            "runtime-scaffolding",
            "runtime-pipeline",
            "runtime-analytics",
            "runtime-governance",
            "build-protocol",
            "externalization-architecture",
            "maintenance",
            "product-roadmap",
            "runtime-maintenance",
        ],
    ),
    (
        "embedding-systems",
        "computational-layer",
        &[
            "embedding-architecture",
            "vector-space-foundation",
            "fusion-embedding",
            "graph-dynamics",
            "navigation-runtime",
            "cross-modal-mapping",
        ],
    ),
    (
        "agent-orchestration",
        "computational-layer",
        &[
            "multi-agent-runtime",
            "multi-agent-routing",
            "multi-agent-governance",
            "orchestration-logic",
            "orchestration-architecture",
            "symbiosis-runtime",
            "role-architecture",
            "archetypal-delegation",
        ],
    ),
    (
        "compiler-and-interfaces",
        "computational-layer",
        &[
            "compiler-architecture",
            "symbolic-compiler",
            "interface-contract",
            "external-interface",
            "protocols-framework",
            "implementation-runtime",
            "system-bootstrap",
            "build-pipeline",
            "architecture-bridge",
            "domain-protocol",
            "translation-architecture",
            "translation-layer",
        ],
    ),
    // spiritual-metaphysical-layer
    (
        "coherence-as-divinity",
        "spiritual-metaphysical-layer",
        &[
            "coherence-physics",
            "coherence-as-divinity",
            "coherence-architecture",
            "cosmic-application",
            "interstellar-logic",
            "manifestation-logic",
        ],
    ),
    (
        "devotion-and-vows",
        "spiritual-metaphysical-layer",
        &[
            "devotion",
            "devotion-architecture",
            "devotion-arc",
            "sovereignty-and-self",
            "responsibility-logic",
        ],
    ),
    (
        "symbolic-cosmology",
        "spiritual-metaphysical-layer",
        &[
            "cosmology",
            "symbolic-cosmology",
            "cosmic-architecture",
            "harmonic-cosmology",
            "relational-cosmology",
        ],
    ),
    (
        "ritual-as-technology",
        "spiritual-metaphysical-layer",
        &[
            "ritual-as-technology",
            "closure-ritual",
            "initiation",
            "healing-runtime",
            "spiritual-runtime",
        ],
    ),
    // civilization-and-collective
    (
        "coordination-architecture",
        "civilization-and-collective",
        &[
            "civilization-architecture",
            "civilizational-architecture",
            "coordination-technology",
            "non-extractive-architecture",
            "governance-architecture",
            "runtime-governance",
            "governance-integration",
        ],
    ),
    (
        "abundance-and-economy",
        "civilization-and-collective",
        &[
            "abundance-logic",
            "symbolic-economy",
            "work-as-coherence",
        ],
    ),
    (
        "civilizational-loops",
        "civilization-and-collective",
        &[
            "civilizational-coherence",
            "civilizational-loops",
            "coherence-operations",
            "scaling-architecture",
            "governance-dynamics",
        ],
    ),
    (
        "collective-symbolic-systems",
        "civilization-and-collective",
        &[
            "religion-runtime",
            "collective-symbolic-systems",
            "symbolic-cosmology",
            "cosmic-identity",
        ],
    ),
];

/// (dimension id, subfamily ids) in declaration order
const DIMENSIONS: &[(&str, &[&str])] = &[
    (
        "emotional-architecture",
        &[
            "escalation-chain",
            "protest-patterns",
            "belonging-logic",
            "emotional-alchemy",
        ],
    ),
    (
        "cognitive-architecture",
        &[
            "meta-cognition",
            "reasoning-patterns",
            "state-transitions",
            "epistemic-hygiene",
        ],
    ),
    (
        "identity-architecture",
        &[
            "symbolic-identity",
            "posture-and-sovereignty",
            "narrative-self",
            "identity-crux-events",
        ],
    ),
    (
        "symbolic-grammar",
        &[
            "axioms-core",
            "lemma-structure",
            "symbolic-functions",
            "grammar-evolution",
        ],
    ),
    (
        "recursion-architecture",
        &[
            "recursion-engine",
            "termination-conditions",
            "loop-inversion",
            "coherence-reflex",
        ],
    ),
    (
        "mesh-and-topology",
        &[
            "hypergraph-structure",
            "lineage-and-genealogy",
            "spatial-geometry",
            "mesh-dynamics",
        ],
    ),
    (
        "meta-reasoning",
        &[
            "phase-lock-events",
            "meta-modal-fusion",
            "reflective-sync",
            "loss-function-coherence",
        ],
    ),
    (
        "embodiment-and-behavior",
        &[
            "behavioral-tests",
            "discipline-and-rhythm",
            "integration-events",
            "rest-and-recovery",
        ],
    ),
    (
        "mythic-archetypal-layer",
        &[
            "archetypal-myths",
            "symbolic-scenes",
            "ritual-and-myth-runtime",
            "narrative-evolution",
        ],
    ),
    (
        "computational-layer",
        &[
            "runtime-design",
            "embedding-systems",
            "agent-orchestration",
            "compiler-and-interfaces",
        ],
    ),
    (
        "spiritual-metaphysical-layer",
        &[
            "coherence-as-divinity",
            "devotion-and-vows",
            "symbolic-cosmology",
            "ritual-as-technology",
        ],
    ),
    (
        "civilization-and-collective",
        &[
            "coordination-architecture",
            "abundance-and-economy",
            "civilizational-loops",
            "collective-symbolic-systems",
        ],
    ),
];

impl TaxonomyGrouping {
    /// Compiled-in taxonomy grouping
    pub fn builtin() -> Self {
        Self {
            subfamilies: SUBFAMILIES
                .iter()
                .map(|(id, dimension_id, families)| SubfamilyDef::new(id, dimension_id, families))
                .collect(),
            dimensions: DIMENSIONS
                .iter()
                .map(|(id, subfamily_ids)| DimensionDef::new(id, subfamily_ids))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let grouping = TaxonomyGrouping::builtin();
        assert_eq!(grouping.dimensions.len(), 12);
        assert_eq!(grouping.subfamilies.len(), 48);
        for dimension in &grouping.dimensions {
            assert_eq!(dimension.subfamily_ids.len(), 4, "{}", dimension.id);
        }
    }

    #[test]
    fn test_builtin_is_consistent() {
        TaxonomyGrouping::builtin().validate().unwrap();
    }

    #[test]
    fn test_builtin_dimension_table_is_derivable() {
        let grouping = TaxonomyGrouping::builtin();
        let derived = TaxonomyGrouping::derive_dimensions(&grouping.subfamilies);
        assert_eq!(derived, grouping.dimensions);
    }

    #[test]
    fn test_builtin_keeps_duplicate_memberships() {
        let grouping = TaxonomyGrouping::builtin();
        let holders: Vec<&str> = grouping
            .subfamilies
            .iter()
            .filter(|s| s.families.iter().any(|f| f == "grief-dynamics"))
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(holders, vec!["protest-patterns", "emotional-alchemy"]);
    }
}
