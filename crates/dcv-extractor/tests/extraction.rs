//! End-to-end extraction over the embedded Portuguese model

use std::sync::Arc;

use dcv_core::{Contact, ExtractionResult, ModelConfig};
use dcv_extractor::{
    extract_resume_info, Annotator, LanguageModel, PatternId, PatternMatcher, ResumeExtractor,
};
use proptest::prelude::*;

const SKILL_PHRASES: [&str; 15] = [
    "gestão financeira",
    "análise estatística",
    "modelagem preditiva",
    "arquitetura distribuída",
    "segurança cibernética",
    "computação gráfica",
    "teoria musical",
    "engenharia reversa",
    "inteligência artificial",
    "visão computacional",
    "automação industrial",
    "pesquisa operacional",
    "comunicação corporativa",
    "liderança técnica",
    "contabilidade tributária",
];

fn model() -> LanguageModel {
    LanguageModel::load(&ModelConfig::default()).unwrap()
}

#[test]
fn test_contact_education_experience_scenario() {
    let result = extract_resume_info(
        "Contato: joao@example.com Telefone: (11)91234-5678. Graduação em Engenharia. \
         Experiência profissional em vendas.",
    );

    assert!(!result.is_degraded());
    assert_eq!(
        result.contacts,
        vec![
            Contact::email("joao@example.com"),
            Contact::phone("(11)91234-5678"),
        ]
    );
    assert!(result
        .education
        .iter()
        .any(|e| e.contains("Graduação em Engenharia")));
    assert!(result
        .experience
        .iter()
        .any(|e| e.contains("Experiência profissional em vendas")));
}

#[test]
fn test_skills_capped_at_first_ten() {
    let text = SKILL_PHRASES.join(", ");
    let result = extract_resume_info(&text);

    assert_eq!(result.skills, SKILL_PHRASES[..10].to_vec());
}

#[test]
fn test_empty_input() {
    let result = extract_resume_info("");
    assert_eq!(result, ExtractionResult::default());
    assert!(!result.is_degraded());
}

#[test]
fn test_repeated_organization_deduplicated() {
    let result = extract_resume_info(
        "Trabalhei na Google. Depois voltei para a Google. Hoje estou na Google.",
    );
    assert_eq!(result.organizations, vec!["Google"]);
}

#[test]
fn test_full_resume() {
    let text = "João da Silva\n\
                São Paulo, SP\n\
                joao.silva@exemplo.com.br | (11) 98765-4321\n\
                \n\
                Formação\n\
                Bacharelado em Ciência da Computação na Universidade de São Paulo\n\
                \n\
                Experiência\n\
                Desenvolvedor no Banco Inter, com foco em \
                arquitetura distribuída e segurança cibernética.\n";

    let result = extract_resume_info(text);

    assert_eq!(result.name.as_deref(), Some("João da Silva"));
    assert_eq!(result.locations, vec!["São Paulo", "SP"]);
    assert_eq!(
        result.organizations,
        vec!["Universidade de São Paulo", "Banco Inter"]
    );
    assert_eq!(
        result.contacts,
        vec![
            Contact::email("joao.silva@exemplo.com.br"),
            Contact::phone("(11) 98765-4321"),
        ]
    );
    // "Bacharelado" continues the match started at "Formação"
    assert_eq!(result.education.len(), 1);
    assert!(result.education[0].contains("Formação\nBacharelado em Ciência da Computação"));
    assert_eq!(result.experience.len(), 1);
    assert!(result.experience[0].contains("Experiência\nDesenvolvedor no Banco Inter"));
    assert!(result.skills.contains(&"arquitetura distribuída".to_string()));
    assert!(result.skills.contains(&"segurança cibernética".to_string()));
}

#[test]
fn test_keywords_glued_by_punctuation() {
    let result =
        extract_resume_info("Graduação em Engenharia.Experiência profissional em vendas.");
    assert_eq!(result.education.len(), 1);
    assert!(result.education[0].contains("Graduação em Engenharia"));
    assert_eq!(result.experience.len(), 1);
    assert!(result.experience[0].contains("Experiência profissional em vendas"));
    assert!(result.skills.iter().all(|s| !s.contains('.')));

    let result = extract_resume_info("Formação: Graduação/Mestrado em Física");
    assert_eq!(result.education.len(), 3);
    assert!(result.education[2].contains("Mestrado em Física"));
}

#[test]
fn test_context_window_at_document_edges() {
    let result = extract_resume_info("Mestrado");
    assert_eq!(result.education, vec!["Mestrado"]);

    let result = extract_resume_info("sete anos de experiência");
    assert_eq!(result.experience, vec!["sete anos de experiência"]);
}

#[test]
fn test_custom_extraction_config() {
    let config = dcv_core::ExtractionConfig {
        max_skills: 3,
        context_window: 0,
        ..Default::default()
    };
    let extractor = ResumeExtractor::new(Arc::new(model())).with_config(config);

    let result = extractor.extract(&SKILL_PHRASES.join(", "));
    assert_eq!(result.skills, SKILL_PHRASES[..3].to_vec());

    let result = extractor.extract("Pós-graduação em Finanças, 2020");
    assert_eq!(result.education, vec!["Pós-graduação em Finanças"]);
}

#[test]
fn test_repeated_calls_are_identical() {
    let text = "Maria Souza trabalhou na Petrobras, Rio de Janeiro. maria@exemplo.com";
    assert_eq!(extract_resume_info(text), extract_resume_info(text));
}

proptest! {
    #[test]
    fn prop_extraction_is_total(text in "\\PC{0,200}") {
        let result = extract_resume_info(&text);
        prop_assert!(!result.is_degraded());
        prop_assert!(result.skills.len() <= 10);
    }

    #[test]
    fn prop_lists_bounded_by_matches(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "Graduação", "em", "Engenharia", "atuou", "como", "analista", ",",
                "ana@exemplo.com", "11-1234-5678", "Google", "Recife", "gestão",
                "financeira", ".", "\n",
            ]),
            0..60,
        )
    ) {
        let text = words.join(" ");
        let model = model();
        let doc = model.annotate(&text).unwrap();
        let matches = PatternMatcher::new().find_matches(&doc);
        let count = |ids: &[PatternId]| {
            matches.iter().filter(|m| ids.contains(&m.pattern_id)).count()
        };

        let result = ResumeExtractor::new(Arc::new(model)).extract(&text);
        prop_assert!(result.contacts.len() <= count(&[PatternId::Email, PatternId::Phone]));
        prop_assert!(result.education.len() <= count(&[PatternId::Education]));
        prop_assert!(result.experience.len() <= count(&[PatternId::Experience]));
        prop_assert!(result.skills.len() <= 10);
    }

    #[test]
    fn prop_idempotent(text in "[a-zA-Zçãéí@.,()\\- 0-9\n]{0,120}") {
        prop_assert_eq!(extract_resume_info(&text), extract_resume_info(&text));
    }
}
