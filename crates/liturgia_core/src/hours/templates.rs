//! Fixed texts of the seven canonical hours.

use super::{Hour, HourKind, PsalmodyEntry};
use crate::model::texts::{Prayer, Psalm};

pub(super) fn template(kind: HourKind) -> Hour {
    match kind {
        HourKind::OfficeReadings => office_readings(),
        HourKind::Laudes => laudes(),
        HourKind::Terca => terca(),
        HourKind::Sexta => sexta(),
        HourKind::Nona => nona(),
        HourKind::Vesperas => vesperas(),
        HourKind::Completas => completas(),
    }
}

fn psalm(number: u32, reference: &str, response: &str, verse: &str) -> Psalm {
    Psalm::new(number, reference)
        .with_response(response)
        .with_verse(verse)
}

fn office_readings() -> Hour {
    Hour {
        kind: HourKind::OfficeReadings,
        name: "Ofício das Leituras".to_string(),
        time: "Durante a noite ou primeira hora do dia".to_string(),
        hymn: Some("Da luz primeira, Criador,\nque separaste a treva do esplendor...".to_string()),
        psalmody: vec![
            PsalmodyEntry::new(
                "A minha boca anunciará vosso louvor",
                psalm(
                    1,
                    "Sl 1",
                    "Feliz o homem que ama a lei do Senhor.",
                    "Feliz o homem que não se guia...",
                ),
            ),
            PsalmodyEntry::new(
                "Adoremos ao Senhor, que nos criou",
                psalm(
                    2,
                    "Sl 2",
                    "Felizes os que no Senhor se refugiam.",
                    "Por que se agitam as nações...",
                ),
            ),
        ],
        reading: Some(
            "Primeira Leitura: Leitura longa da Sagrada Escritura\n\
             Segunda Leitura: Leitura dos Santos Padres ou escritores eclesiásticos"
                .to_string(),
        ),
        canticle: None,
        prayers: vec![Prayer::new(
            "Oração Final",
            "Deus eterno e todo-poderoso, que nos congregais para rezarmos no início deste dia...",
        )],
    }
}

fn laudes() -> Hour {
    Hour {
        kind: HourKind::Laudes,
        name: "Laudes (Oração da Manhã)".to_string(),
        time: "Ao amanhecer".to_string(),
        hymn: Some(
            "Ó Cristo, sol da verdade,\nque iluminas o universo,\nda tua imensa bondade\na luz vem, sempre diversa."
                .to_string(),
        ),
        psalmody: vec![
            PsalmodyEntry::new(
                "Bendizei ao Senhor todas as suas obras",
                psalm(
                    63,
                    "Sl 63,2-9",
                    "Minha alma tem sede de Vós, ó Senhor.",
                    "Ó Deus, vós sois o meu Deus, eu vos procuro...",
                ),
            ),
            PsalmodyEntry::new(
                "Que tudo quanto existe cante um hino ao Senhor",
                psalm(
                    149,
                    "Sl 149",
                    "O Senhor ama o seu povo.",
                    "Cantai ao Senhor Deus um canto novo...",
                ),
            ),
        ],
        reading: Some("Leitura breve: Rm 13,11-12a".to_string()),
        canticle: Some("Benedictus - Cântico de Zacarias (Lc 1,68-79)".to_string()),
        prayers: vec![
            Prayer::new(
                "Preces",
                "Oremos ao Senhor que nos criou para louvarmos seu nome...",
            )
            .with_response("Senhor, tende piedade de nós"),
            Prayer::new(
                "Oração Final",
                "Pai santo, dai-nos neste novo dia a graça de vos servir com alegria...",
            ),
        ],
    }
}

fn terca() -> Hour {
    Hour {
        kind: HourKind::Terca,
        name: "Terça (Hora Média - Meio da Manhã)".to_string(),
        time: "Por volta das 9h".to_string(),
        hymn: Some(
            "Vinde, Espírito Santo,\nna hora em que descestes\nsobre os Apóstolos reunidos,\nenchei-nos dos vossos dons."
                .to_string(),
        ),
        psalmody: vec![
            PsalmodyEntry::new(
                "Ensinai-me, Senhor, o caminho dos vossos preceitos",
                psalm(
                    119,
                    "Sl 118(119),33-40",
                    "Dai-me a vida pela vossa palavra.",
                    "Ensinai-me, Senhor, o caminho de vossas leis...",
                ),
            ),
            PsalmodyEntry::new(
                "O meu auxílio vem do Senhor",
                psalm(
                    121,
                    "Sl 120(121)",
                    "O Senhor é o teu guarda.",
                    "Levanto os meus olhos para os montes...",
                ),
            ),
        ],
        reading: Some("Leitura breve: Rm 5,5".to_string()),
        canticle: None,
        prayers: vec![Prayer::new(
            "Oração Final",
            "Senhor, que na hora terceira enviastes o Espírito Santo aos Apóstolos, renovai em nós o seu fogo...",
        )],
    }
}

fn sexta() -> Hour {
    Hour {
        kind: HourKind::Sexta,
        name: "Sexta (Hora Média - Meio-Dia)".to_string(),
        time: "Por volta das 12h".to_string(),
        hymn: Some(
            "Ó Deus, que governais o tempo,\nno calor do meio-dia\nguardai-nos de toda discórdia\ne dai-nos a vossa paz."
                .to_string(),
        ),
        psalmody: vec![
            PsalmodyEntry::new(
                "Minha alma espera no Senhor",
                psalm(
                    123,
                    "Sl 122(123)",
                    "Nossos olhos estão fitos no Senhor.",
                    "A vós levanto os meus olhos, a vós que habitais nos céus...",
                ),
            ),
            PsalmodyEntry::new(
                "",
                psalm(
                    124,
                    "Sl 123(124)",
                    "O nosso auxílio está no nome do Senhor.",
                    "Se o Senhor não estivesse ao nosso lado...",
                ),
            ),
        ],
        reading: Some("Leitura breve: Dt 4,7".to_string()),
        canticle: None,
        prayers: vec![Prayer::new(
            "Oração Final",
            "Deus de misericórdia, que nos dais o descanso do meio-dia, sustentai o nosso trabalho...",
        )],
    }
}

fn nona() -> Hour {
    Hour {
        kind: HourKind::Nona,
        name: "Nona (Hora Média - Meio da Tarde)".to_string(),
        time: "Por volta das 15h".to_string(),
        hymn: Some(
            "Ó Deus, força inabalável,\nque a tudo dais movimento,\nconcedei-nos ao fim do dia\numa luz que não se apague."
                .to_string(),
        ),
        psalmody: vec![PsalmodyEntry::new(
            "Os que semeiam entre lágrimas colherão com alegria",
            psalm(
                126,
                "Sl 125(126)",
                "Maravilhas fez conosco o Senhor.",
                "Quando o Senhor reconduziu nossos cativos...",
            ),
        )],
        reading: Some("Leitura breve: 1 Cor 12,4-6".to_string()),
        canticle: None,
        prayers: vec![Prayer::new(
            "Oração Final",
            "Senhor Jesus Cristo, que na hora nona estendestes os braços na cruz, atraí-nos a vós...",
        )],
    }
}

fn vesperas() -> Hour {
    Hour {
        kind: HourKind::Vesperas,
        name: "Vésperas (Oração da Tarde)".to_string(),
        time: "Ao entardecer".to_string(),
        hymn: Some(
            "Ó Cristo, luz do mundo,\nque a noite se aproxima,\nacendei em nós o fogo\nda caridade divina."
                .to_string(),
        ),
        psalmody: vec![
            PsalmodyEntry::new(
                "Como incenso suba a vós minha oração",
                psalm(
                    141,
                    "Sl 141(142)",
                    "Suba minha oração, como incenso, à vossa presença.",
                    "Senhor, a vós clamo: vinde depressa...",
                ),
            ),
            PsalmodyEntry::new(
                "Bendito seja Deus, agora e sempre",
                psalm(
                    110,
                    "Sl 110(111)",
                    "Grandes são as obras do Senhor.",
                    "De todo coração agradeço ao Senhor...",
                ),
            ),
        ],
        reading: Some("Leitura breve: 1 Pd 1,3-5".to_string()),
        canticle: Some("Magnificat - Cântico de Maria (Lc 1,46-55)".to_string()),
        prayers: vec![
            Prayer::new(
                "Preces",
                "Oremos nesta hora em que Cristo, pendurado na cruz, nos abriu as portas da salvação...",
            )
            .with_response("Senhor, escutai nossa oração"),
            Prayer::new("Pai Nosso", "Rezemos ao Pai como Jesus nos ensinou..."),
            Prayer::new(
                "Oração Final",
                "Concedei-nos, ó Deus, que esta noite transcorra em santa paz...",
            ),
        ],
    }
}

fn completas() -> Hour {
    Hour {
        kind: HourKind::Completas,
        name: "Completas (Oração da Noite)".to_string(),
        time: "Antes de dormir".to_string(),
        hymn: Some(
            "Antes que a noite desça,\na ti, Senhor, recorro;\nguarda-me nesta treva,\nde todo mal socorro."
                .to_string(),
        ),
        psalmody: vec![PsalmodyEntry::new(
            "Em tuas mãos, Senhor, entrego meu espírito",
            psalm(
                91,
                "Sl 91(92)",
                "Habita à sombra do Onipotente.",
                "Aquele que no abrigo do Altíssimo reside...",
            ),
        )],
        reading: Some("Leitura breve: Jr 14,9b".to_string()),
        canticle: Some("Nunc Dimittis - Cântico de Simeão (Lc 2,29-32)".to_string()),
        prayers: vec![Prayer::new(
            "Oração Final",
            "Concedei-nos, Deus todo-poderoso, uma noite tranquila e um fim perfeito.",
        )],
    }
}
