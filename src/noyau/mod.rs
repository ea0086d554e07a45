//! Noyau NPI (notation polonaise inversée)
//!
//! Organisation interne :
//! - jetons.rs  : classification (littéraux décimaux + jeu d'opérations)
//! - lecture.rs : arithmétique décimale scalée (précision 16) + affichage tronqué
//! - erreurs.rs : fautes signalées à l'utilisateur
//! - eval.rs    : la machine à pile (opérandes + journaux d'annulation)

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod lecture;

#[cfg(test)]
mod tests_calculatrice;

// API publique minimale
pub use eval::Evaluateur;
