//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir l'état de la calculatrice (composeur d'entrée,
//! résultat, erreur, décimales, démarche) et offrir des opérations
//! simples (C/CLR/AC) sans logique d'affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing, pas de pipeline).
//! - Actions déterministes, sans effet de bord caché.
//! - Le tampon d'expression appartient au composeur du noyau : la vue
//!   n'y touche que par jetons (inserer / effacer_dernier / vider).

use crate::noyau::Composeur;

/// Décimales affichées par défaut (le résultat reste un f64).
const DECIMALES_DEFAUT: usize = 12;

/// Garde-fou : au-delà, les chiffres affichés n'ont plus de sens en f64.
const DECIMALES_MAX: usize = 17;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur (tampon + drapeaux, côté noyau) ---
    pub composeur: Composeur,

    // --- sorties ---
    pub resultat: String,     // dernier résultat formaté
    pub erreur: String,       // message d'erreur (si l'évaluation échoue)
    pub resultat_dispo: bool, // false tant que rien n'a été évalué

    // --- démarche (panneau d'explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub decimales: usize, // précision d'affichage
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            composeur: Composeur::new(),
            resultat: String::new(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: Demarche::default(),
            decimales: DECIMALES_DEFAUT,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + décimales par défaut).
    pub fn reset_total(&mut self) {
        self.composeur.vider();
        self.clear_resultats();
        self.decimales = DECIMALES_DEFAUT;
    }

    /// C : effacer seulement l'entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.composeur.vider();
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l'entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.clear_demarche();
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l'écran” sur une faute.
    /// - On coupe la démarche (non fiable si l'évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.clear_demarche();
    }

    /// Utilitaire : déposer un résultat complet (texte formaté + démarche).
    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.resultat_dispo = true;
        self.demarche = demarche;
    }

    /// Garde-fou : limite les décimales affichées.
    pub fn set_decimales(&mut self, decimales: usize) {
        self.decimales = decimales.clamp(0, DECIMALES_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::{Jeton, Operateur};

    #[test]
    fn erreur_conserve_le_dernier_resultat() {
        let mut app = AppCalc::default();
        app.set_resultat("14", Demarche::default());
        app.set_erreur("division par zéro");
        assert_eq!(app.resultat, "14");
        assert_eq!(app.erreur, "division par zéro");
    }

    #[test]
    fn reset_total_vide_tout() {
        let mut app = AppCalc::default();
        app.composeur.inserer(Jeton::Chiffre('2'));
        app.composeur.inserer(Jeton::Operateur(Operateur::Plus));
        app.set_resultat("2", Demarche::default());
        app.set_decimales(3);

        app.reset_total();
        assert!(app.composeur.est_vide());
        assert!(app.resultat.is_empty());
        assert!(!app.resultat_dispo);
        assert_eq!(app.decimales, 12);
    }

    #[test]
    fn clear_resultats_ne_touche_pas_l_entree() {
        let mut app = AppCalc::default();
        app.composeur.inserer(Jeton::Chiffre('7'));
        app.set_resultat("7", Demarche::default());

        app.clear_resultats();
        assert_eq!(app.composeur.entree(), "7");
        assert!(app.resultat.is_empty());
    }

    #[test]
    fn decimales_bornees() {
        let mut app = AppCalc::default();
        app.set_decimales(9999);
        assert_eq!(app.decimales, 17);
    }
}
