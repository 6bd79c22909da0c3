//! Knowledge base articles bundled with the site and written by the
//! `seed_knowledge_base` binary.

use crate::domain::article::NewArticle;
use crate::domain::types::{
    ArticleCategory, ArticleSlug, ArticleTitle, NonEmptyString, SanitizedText,
    TypeConstraintError,
};

struct SeedArticle {
    slug: &'static str,
    title: &'static str,
    category: &'static str,
    summary: &'static str,
    body: &'static str,
}

const ARTICLES: &[SeedArticle] = &[
    SeedArticle {
        slug: "vrijwilligers-waarderen",
        title: "Vrijwilligers waarderen zonder budget",
        category: "Waardering",
        summary: "Kleine gebaren die het verschil maken voor je vrijwilligers.",
        body: "<p>Waardering hoeft geen geld te kosten. Een persoonlijk bedankje na een \
               drukke dienst, een verjaardagskaart of een vermelding in de nieuwsbrief \
               laat zien dat je iemands inzet opmerkt.</p>\
               <p>Plan waardering in: zet vaste momenten in de agenda en houd bij wie \
               je wanneer hebt bedankt.</p>",
    },
    SeedArticle {
        slug: "roosters-die-werken",
        title: "Roosters die werken",
        category: "Organisatie",
        summary: "Zo voorkom je gaten in het rooster en overbelaste vrijwilligers.",
        body: "<p>Een goed rooster begint bij beschikbaarheid. Vraag die periodiek uit \
               en laat vrijwilligers zelf diensten ruilen.</p>\
               <p>Houd het aantal uren per persoon in de gaten zodat de vaste kern niet \
               alles opvangt.</p>",
    },
    SeedArticle {
        slug: "nieuwe-vrijwilligers-binden",
        title: "Nieuwe vrijwilligers binden",
        category: "Werving",
        summary: "De eerste drie maanden bepalen of een vrijwilliger blijft.",
        body: "<p>Koppel nieuwe vrijwilligers aan een maatje, plan na vier weken een \
               kort gesprek en geef duidelijk aan bij wie ze terecht kunnen.</p>",
    },
    SeedArticle {
        slug: "contact-houden",
        title: "Contact houden met je vrijwilligers",
        category: "Communicatie",
        summary: "Regelmatige, korte berichten werken beter dan een lange nieuwsbrief.",
        body: "<p>Stuur liever vaker een kort bericht dan eens per kwartaal een lange \
               nieuwsbrief. Deel successen, vraag om feedback en reageer op wat je \
               terugkrijgt.</p>",
    },
];

/// Articles to upsert into the knowledge base, all published.
pub fn seed_articles() -> Result<Vec<NewArticle>, TypeConstraintError> {
    ARTICLES
        .iter()
        .map(|seed| {
            Ok(NewArticle {
                slug: ArticleSlug::new(seed.slug)?,
                title: ArticleTitle::new(seed.title)?,
                category: ArticleCategory::new(seed.category)?,
                summary: NonEmptyString::new(seed.summary)?,
                body: SanitizedText::new(seed.body)?,
                published: true,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn seed_articles_are_valid_and_unique() {
        let articles = seed_articles().unwrap();
        let slugs: HashSet<_> = articles.iter().map(|a| a.slug.clone()).collect();

        assert_eq!(articles.len(), ARTICLES.len());
        assert_eq!(slugs.len(), articles.len());
        assert!(articles.iter().all(|a| a.body.as_str().starts_with("<p>")));
    }
}
