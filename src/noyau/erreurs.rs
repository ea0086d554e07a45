// src/noyau/erreurs.rs

use thiserror::Error;

/// Fautes signalées pendant le traitement d'une ligne.
///
/// Toutes sont locales au jeton fautif : le message part sur le canal de
/// diagnostic et le traitement reprend au jeton suivant, sans toucher à la
/// pile ni aux journaux. Les gabarits de message sont le contrat d'affichage,
/// reproduits à l'identique (l'opération invalide ne porte pas de position).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Jeton qui n'est ni un nombre ni un symbole du jeu d'opérations.
    #[error("Invalid operation: {0}")]
    OperationInvalide(String),

    /// Opération reconnue mais pile trop courte pour son arité.
    #[error("operator {symbole} (position: {position}): insufficient parameters")]
    ParametresInsuffisants { symbole: String, position: usize },

    /// Faute de l'arithmétique elle-même (division par zéro, racine d'un
    /// négatif), détectée avant toute mutation.
    #[error("operator {symbole} (position: {position}): {detail}")]
    FauteArithmetique {
        symbole: String,
        position: usize,
        detail: String,
    },
}
