// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs du noyau (évaluation).
///
/// Chaque rejet du pipeline porte sa cause précise : l'UI affiche le
/// message tel quel, les tests comparent les variantes.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurEval {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("erreur de syntaxe: {0}")]
    Syntaxe(String),

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("hors domaine: {0}")]
    HorsDomaine(String),
}

impl ErreurEval {
    /// Raccourci : erreur de syntaxe avec message.
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }

    /// Raccourci : erreur de domaine avec message.
    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurEval::HorsDomaine(msg.into())
    }
}
