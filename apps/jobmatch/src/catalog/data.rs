//! Built-in sectors.
//!
//! Axis order for every vector below: `[STRUCTURE, CREATIVITY, ACTION,
//! HUMAN_CONTACT, ANALYSIS, RISK_TOLERANCE, STABILITY, LEADERSHIP]`

use crate::axis::{AxisVector, AXIS_COUNT};
use crate::variant::VariantRule;

use super::{CatalogError, Sector, Track, Whitelist};

pub const INFORMATIQUE: &str = "informatique";
pub const DROIT: &str = "droit";
pub const DEFENSE: &str = "defense";
pub const CULTURE_MEDIAS: &str = "culture_medias";
pub const SANTE: &str = "sante";

pub const INFORMATIQUE_VECTORS: [(&str, [f64; AXIS_COUNT]); 30] = [
    ("Développeur web", [6.0, 6.0, 3.0, 3.0, 7.0, 4.0, 6.0, 3.0]),
    ("Développeur mobile", [6.0, 7.0, 3.0, 3.0, 7.0, 4.0, 5.0, 3.0]),
    ("Ingénieur logiciel", [7.0, 5.0, 3.0, 3.0, 8.0, 3.0, 7.0, 4.0]),
    ("Data scientist", [6.0, 5.0, 2.0, 3.0, 10.0, 4.0, 6.0, 3.0]),
    ("Data analyst", [7.0, 3.0, 2.0, 4.0, 9.0, 2.0, 7.0, 3.0]),
    ("Administrateur systèmes et réseaux", [8.0, 2.0, 4.0, 3.0, 7.0, 2.0, 8.0, 3.0]),
    ("Ingénieur DevOps", [7.0, 4.0, 5.0, 3.0, 8.0, 4.0, 6.0, 4.0]),
    ("Architecte cloud", [7.0, 5.0, 3.0, 4.0, 8.0, 4.0, 6.0, 6.0]),
    ("Expert en cybersécurité", [8.0, 4.0, 4.0, 2.0, 9.0, 3.0, 7.0, 4.0]),
    ("Pentesteur", [5.0, 6.0, 5.0, 2.0, 8.0, 7.0, 4.0, 3.0]),
    ("Chef de projet informatique", [7.0, 4.0, 4.0, 8.0, 6.0, 4.0, 6.0, 8.0]),
    ("Product owner", [6.0, 6.0, 4.0, 8.0, 6.0, 5.0, 5.0, 7.0]),
    ("Scrum master", [7.0, 4.0, 4.0, 9.0, 4.0, 3.0, 6.0, 7.0]),
    ("UX designer", [4.0, 9.0, 3.0, 7.0, 6.0, 4.0, 5.0, 3.0]),
    ("UI designer", [4.0, 10.0, 2.0, 5.0, 4.0, 4.0, 5.0, 2.0]),
    ("Technicien support informatique", [6.0, 2.0, 5.0, 8.0, 5.0, 2.0, 8.0, 2.0]),
    ("Ingénieur en intelligence artificielle", [6.0, 7.0, 2.0, 2.0, 10.0, 5.0, 5.0, 3.0]),
    ("Développeur de jeux vidéo", [5.0, 9.0, 3.0, 3.0, 7.0, 6.0, 4.0, 3.0]),
    ("Intégrateur web", [7.0, 6.0, 3.0, 3.0, 5.0, 2.0, 7.0, 2.0]),
    ("Testeur logiciel", [9.0, 3.0, 3.0, 3.0, 7.0, 2.0, 8.0, 2.0]),
    ("Administrateur de bases de données", [9.0, 2.0, 2.0, 2.0, 8.0, 2.0, 9.0, 3.0]),
    ("Ingénieur réseaux", [8.0, 3.0, 5.0, 3.0, 8.0, 3.0, 7.0, 4.0]),
    ("Consultant ERP", [7.0, 3.0, 4.0, 8.0, 7.0, 4.0, 5.0, 5.0]),
    (
        "Responsable de la sécurité des systèmes d'information",
        [9.0, 3.0, 4.0, 5.0, 8.0, 3.0, 7.0, 8.0],
    ),
    (
        "Directeur des systèmes d'information",
        [8.0, 5.0, 4.0, 7.0, 7.0, 5.0, 6.0, 10.0],
    ),
    ("Ingénieur systèmes embarqués", [8.0, 5.0, 5.0, 2.0, 9.0, 3.0, 7.0, 3.0]),
    ("Analyste programmeur", [8.0, 4.0, 2.0, 4.0, 8.0, 2.0, 8.0, 3.0]),
    ("Technicien de maintenance informatique", [7.0, 2.0, 8.0, 5.0, 5.0, 2.0, 8.0, 2.0]),
    ("Consultant en transformation numérique", [5.0, 7.0, 4.0, 8.0, 6.0, 6.0, 4.0, 7.0]),
    ("Ingénieur big data", [7.0, 4.0, 2.0, 2.0, 9.0, 3.0, 7.0, 3.0]),
];

pub const DROIT_ARCHETYPE: [f64; AXIS_COUNT] = [8.0, 3.0, 4.0, 6.0, 8.0, 2.0, 7.0, 5.0];

pub const DROIT_TITLES: [&str; 30] = [
    "Avocat",
    "Juriste d'entreprise",
    "Notaire",
    "Huissier de justice",
    "Magistrat",
    "Greffier",
    "Clerc de notaire",
    "Juriste en droit social",
    "Juriste en propriété intellectuelle",
    "Avocat fiscaliste",
    "Conseiller juridique",
    "Médiateur",
    "Mandataire judiciaire",
    "Administrateur judiciaire",
    "Juriste en droit de l'environnement",
    "Juriste bancaire",
    "Compliance officer",
    "Paralegal",
    "Juriste immobilier",
    "Avocat pénaliste",
    "Juriste en droit du numérique",
    "Délégué à la protection des données",
    "Commissaire de justice",
    "Juge des enfants",
    "Conciliateur de justice",
    "Juriste assurances",
    "Secrétaire juridique",
    "Juriste en droit international",
    "Legal designer",
    "Enseignant-chercheur en droit",
];

/// Alternate `droit` track for profiles that also score close to `defense`.
pub const DROIT_DEFENSE_ARCHETYPE: [f64; AXIS_COUNT] = [8.0, 2.0, 6.0, 5.0, 7.0, 4.0, 7.0, 6.0];

pub const DROIT_DEFENSE_TITLES: [&str; 30] = [
    "Commissaire des armées",
    "Juriste de la défense",
    "Conseiller juridique opérationnel",
    "Officier de gendarmerie",
    "Officier de police judiciaire",
    "Inspecteur des douanes",
    "Juriste en droit international humanitaire",
    "Analyste en renseignement",
    "Juriste en contrôle des exportations",
    "Expert en sûreté",
    "Auditeur de sécurité",
    "Enquêteur judiciaire",
    "Commissaire de police",
    "Juriste en droit pénal international",
    "Conseiller en intelligence économique",
    "Acheteur public de défense",
    "Juriste en cybersécurité",
    "Inspecteur des finances publiques",
    "Magistrat du parquet",
    "Juge d'instruction",
    "Avocat en droit pénal des affaires",
    "Lieutenant de police",
    "Conseiller en sécurité diplomatique",
    "Juriste en droit maritime",
    "Officier de l'administration pénitentiaire",
    "Directeur des services pénitentiaires",
    "Juriste en droit aérien et spatial",
    "Contrôleur des douanes",
    "Attaché d'administration du ministère des Armées",
    "Inspecteur de la concurrence",
];

pub const DEFENSE_ARCHETYPE: [f64; AXIS_COUNT] = [8.0, 2.0, 8.0, 5.0, 5.0, 6.0, 6.0, 7.0];

pub const DEFENSE_TITLES: [&str; 30] = [
    "Officier de l'armée de Terre",
    "Officier de marine",
    "Pilote de chasse",
    "Sous-officier",
    "Commando parachutiste",
    "Mécanicien aéronautique",
    "Technicien en transmissions",
    "Infirmier militaire",
    "Médecin militaire",
    "Sapeur-pompier de Paris",
    "Gendarme",
    "Gendarme mobile",
    "Fusilier marin",
    "Contrôleur aérien militaire",
    "Officier du renseignement",
    "Démineur",
    "Chef d'équipe logistique",
    "Maître-chien militaire",
    "Atomicien de la marine",
    "Sous-marinier",
    "Spécialiste en cyberdéfense",
    "Interprète militaire",
    "Opérateur drone",
    "Chasseur alpin",
    "Légionnaire",
    "Musicien militaire",
    "Géographe militaire",
    "Instructeur commando",
    "Officier logisticien",
    "Analyste image",
];

pub const CULTURE_MEDIAS_ARCHETYPE: [f64; AXIS_COUNT] = [3.0, 8.0, 6.0, 6.0, 4.0, 6.0, 3.0, 5.0];

pub const CULTURE_MEDIAS_TITLES: [&str; 30] = [
    "Producteur",
    "Réalisateur",
    "Journaliste",
    "Monteur vidéo",
    "Chef opérateur",
    "Ingénieur du son",
    "Scénariste",
    "Community manager",
    "Chargé de communication",
    "Attaché de presse",
    "Régisseur",
    "Comédien",
    "Directeur artistique",
    "Graphiste",
    "Photographe",
    "Animateur radio",
    "Présentateur télévision",
    "Programmateur musical",
    "Éditeur",
    "Bibliothécaire",
    "Conservateur de musée",
    "Médiateur culturel",
    "Motion designer",
    "Illustrateur",
    "Rédacteur web",
    "Critique",
    "Chargé de production",
    "Scripte",
    "Décorateur de cinéma",
    "Directeur de casting",
];

/// Not eligible for vectorization: ranking falls back to the seeded shuffle.
pub const SANTE_TITLES: [&str; 30] = [
    "Infirmier",
    "Médecin généraliste",
    "Aide-soignant",
    "Pharmacien",
    "Kinésithérapeute",
    "Sage-femme",
    "Orthophoniste",
    "Psychologue",
    "Ergothérapeute",
    "Manipulateur en radiologie",
    "Préparateur en pharmacie",
    "Chirurgien-dentiste",
    "Ostéopathe",
    "Diététicien",
    "Opticien",
    "Audioprothésiste",
    "Psychomotricien",
    "Ambulancier",
    "Auxiliaire de puériculture",
    "Cadre de santé",
    "Médecin urgentiste",
    "Chirurgien",
    "Anesthésiste",
    "Pédicure-podologue",
    "Orthoptiste",
    "Technicien de laboratoire médical",
    "Infirmier de bloc opératoire",
    "Assistant dentaire",
    "Secrétaire médical",
    "Directeur d'établissement de santé",
];

fn generated(
    sector: &str,
    titles: &[&str],
    archetype: [f64; AXIS_COUNT],
) -> Result<Track, CatalogError> {
    let whitelist = Whitelist::new(sector, titles.iter().copied())?;
    let archetype = AxisVector::new(archetype).map_err(|source| CatalogError::InvalidVector {
        sector: sector.to_string(),
        title: "<archetype>".to_string(),
        source,
    })?;
    Ok(Track::generated(whitelist, archetype))
}

pub fn builtin_sectors() -> Result<Vec<Sector>, CatalogError> {
    Ok(vec![
        Sector::new(INFORMATIQUE, Track::authored(INFORMATIQUE, &INFORMATIQUE_VECTORS)?),
        Sector::new(DROIT, generated(DROIT, &DROIT_TITLES, DROIT_ARCHETYPE)?).with_alternate(
            VariantRule::new(DEFENSE),
            generated(DROIT, &DROIT_DEFENSE_TITLES, DROIT_DEFENSE_ARCHETYPE)?,
        ),
        Sector::new(DEFENSE, generated(DEFENSE, &DEFENSE_TITLES, DEFENSE_ARCHETYPE)?),
        Sector::new(
            CULTURE_MEDIAS,
            generated(CULTURE_MEDIAS, &CULTURE_MEDIAS_TITLES, CULTURE_MEDIAS_ARCHETYPE)?,
        ),
        Sector::new(SANTE, Track::whitelist_only(Whitelist::new(SANTE, SANTE_TITLES)?)),
    ])
}
