//! Canonical catalog of Mass parts.
//!
//! # Responsibility
//! - Define every liturgical segment key, its display title and order index.
//! - Partition the catalog into the four sections of the Mass.
//!
//! # Invariants
//! - Orders are strictly increasing `1..=77` in catalog order.
//! - Keys are unique.
//! - Section boundaries are the inclusive upper orders `{12, 26, 69, 77}`.

use crate::model::part::Part;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Fixed text pre-filled in the `greeting` part.
pub const GREETING_DEFAULT: &str = "Em nome do Pai, do Filho e do Espírito Santo.";
/// Fixed text pre-filled in the `kyrie` part.
pub const KYRIE_DEFAULT: &str = "Senhor, tende piedade de nós.";

/// Number of parts in the reduced catalog.
pub const SIMPLE_CATALOG_LEN: usize = 28;

/// Static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub order: u32,
}

const fn spec(key: &'static str, title: &'static str, order: u32) -> PartSpec {
    PartSpec { key, title, order }
}

const CANONICAL_PARTS: &[PartSpec] = &[
    // Ritos Iniciais
    spec("entrance_procession", "Procissão de Entrada", 1),
    spec("entrance_antiphon", "Antífona de Entrada", 2),
    spec("entrance_hymn", "Canto de Entrada", 3),
    spec("sign_cross", "Sinal da Cruz", 4),
    spec("greeting", "Saudação", 5),
    spec("introduction", "Introdução à Celebração", 6),
    spec("blessing_water", "Bênção e Aspersão da Água (opcional)", 7),
    spec("penitential_intro", "Introdução ao Ato Penitencial", 8),
    spec("penitential", "Ato Penitencial", 9),
    spec("kyrie", "Kyrie", 10),
    spec("gloria", "Glória", 11),
    spec("collect", "Oração do Dia (Coleta)", 12),
    // Liturgia da Palavra
    spec("first_reading", "Primeira Leitura", 13),
    spec("responsorial_gradual", "Canto Responsorial/Gradual", 14),
    spec("psalm", "Salmo Responsorial", 15),
    spec("second_reading", "Segunda Leitura", 16),
    spec("sequence", "Sequência (dias especiais)", 17),
    spec("gospel_acclamation", "Aclamação ao Evangelho (Aleluia)", 18),
    spec("gospel_procession", "Procissão do Evangelho", 19),
    spec("gospel", "Evangelho", 20),
    spec("homily", "Homilia", 21),
    spec("silence_reflection", "Silêncio para Reflexão", 22),
    spec("creed", "Profissão de Fé (Credo)", 23),
    spec("prayers_faithful_intro", "Introdução à Oração dos Fiéis", 24),
    spec("prayers_faithful", "Oração dos Fiéis", 25),
    spec("prayers_faithful_conclusion", "Conclusão da Oração dos Fiéis", 26),
    // Liturgia Eucarística: preparação das oferendas
    spec("offertory_procession", "Procissão das Oferendas", 27),
    spec("offertory_hymn", "Canto das Oferendas", 28),
    spec("offertory", "Apresentação das Oferendas", 29),
    spec("preparation_bread", "Preparação do Pão", 30),
    spec("preparation_wine", "Preparação do Vinho", 31),
    spec("mixing_water_wine", "Mistura da Água com o Vinho", 32),
    spec("offering_incense", "Incensação das Oferendas (opcional)", 33),
    spec("washing_hands", "Lavabo (Lavagem das Mãos)", 34),
    spec("invitation_prayer", "Convite à Oração", 35),
    spec("prayer_offerings", "Oração sobre as Oferendas", 36),
    // Oração eucarística
    spec("preface_dialogue", "Diálogo do Prefácio", 37),
    spec("preface", "Prefácio", 38),
    spec("sanctus", "Santo", 39),
    spec(
        "epiclesis_1",
        "Primeira Epiclese (invocação do Espírito Santo)",
        40,
    ),
    spec("institution_narrative", "Narrativa da Instituição", 41),
    spec("consecration_bread", "Consagração do Pão", 42),
    spec("consecration_wine", "Consagração do Vinho", 43),
    spec("elevation", "Elevação", 44),
    spec("mystery_faith", "Mistério da Fé (Aclamação)", 45),
    spec("anamnesis", "Anamnese (Memorial)", 46),
    spec("epiclesis_2", "Segunda Epiclese", 47),
    spec("intercessions", "Intercessões", 48),
    spec("doxology", "Doxologia Final", 49),
    spec("great_amen", "Grande Amém", 50),
    // Rito da comunhão
    spec("our_father_intro", "Introdução ao Pai Nosso", 51),
    spec("our_father", "Pai Nosso", 52),
    spec("embolism", "Embolismo (Livrai-nos de todos os males)", 53),
    spec("doxology_prayer", "Doxologia do Povo", 54),
    spec("peace_prayer", "Oração pela Paz", 55),
    spec("peace", "Rito da Paz", 56),
    spec("peace_exchange", "Saudação da Paz", 57),
    spec("fraction", "Fração do Pão", 58),
    spec("agnus_dei", "Cordeiro de Deus", 59),
    spec("commingling", "Imissão (mistura do pão e vinho)", 60),
    spec("private_preparation", "Oração Privada do Sacerdote", 61),
    spec("invitation_communion", "Convite à Comunhão", 62),
    spec("communion", "Comunhão", 63),
    spec("communion_antiphon", "Antífona da Comunhão", 64),
    spec("communion_hymn", "Canto de Comunhão", 65),
    spec("communion_meditation", "Momento de Ação de Graças", 66),
    spec("purification", "Purificação dos Vasos Sagrados", 67),
    spec("silence_thanksgiving", "Silêncio para Ação de Graças", 68),
    spec("prayer_communion", "Oração depois da Comunhão", 69),
    // Ritos Finais
    spec("greeting_final", "Saudação Final", 70),
    spec("announcements", "Avisos", 71),
    spec("blessing_introduction", "Introdução à Bênção", 72),
    spec("solemn_blessing", "Bênção Solene (opcional)", 73),
    spec("blessing", "Bênção", 74),
    spec("dismissal", "Despedida", 75),
    spec("recession", "Procissão de Saída", 76),
    spec("final_hymn", "Canto Final", 77),
];

/// Which slice of the catalog a document starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartCatalog {
    /// All 77 canonical parts.
    #[default]
    Complete,
    /// The first 28 canonical parts.
    Simple,
}

impl PartCatalog {
    /// Catalog entries in canonical order.
    pub fn specs(self) -> &'static [PartSpec] {
        match self {
            Self::Complete => CANONICAL_PARTS,
            Self::Simple => &CANONICAL_PARTS[..SIMPLE_CATALOG_LEN],
        }
    }
}

/// The four sections of the Mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Introductory,
    Word,
    Eucharist,
    Concluding,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Self::Introductory,
        Self::Word,
        Self::Eucharist,
        Self::Concluding,
    ];

    /// Section owning an order index. Orders past 77 (custom parts placed at
    /// the end) belong to the concluding rites.
    pub fn for_order(order: u32) -> Self {
        match order {
            0..=12 => Self::Introductory,
            13..=26 => Self::Word,
            27..=69 => Self::Eucharist,
            _ => Self::Concluding,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Introductory => "Ritos Iniciais",
            Self::Word => "Liturgia da Palavra",
            Self::Eucharist => "Liturgia Eucarística",
            Self::Concluding => "Ritos Finais",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Full canonical catalog in order.
pub fn canonical_parts() -> &'static [PartSpec] {
    CANONICAL_PARTS
}

/// Looks up a canonical catalog entry by key.
pub fn find_spec(key: &str) -> Option<&'static PartSpec> {
    CANONICAL_PARTS.iter().find(|spec| spec.key == key)
}

/// Default text of a canonical part (empty for most parts).
pub fn default_content(key: &str) -> &'static str {
    match key {
        "greeting" => GREETING_DEFAULT,
        "kyrie" => KYRIE_DEFAULT,
        _ => "",
    }
}

/// Builds a fresh key-to-part mapping for the chosen catalog.
///
/// Every part starts with empty content except the fixed invariant texts.
/// Insertion sequence numbers follow catalog order.
pub fn build_default_parts(catalog: PartCatalog) -> BTreeMap<String, Part> {
    catalog
        .specs()
        .iter()
        .zip(0u32..)
        .map(|(spec, sequence)| {
            (
                spec.key.to_string(),
                Part::new(
                    spec.key,
                    spec.title,
                    default_content(spec.key),
                    spec.order,
                    sequence,
                ),
            )
        })
        .collect()
}
