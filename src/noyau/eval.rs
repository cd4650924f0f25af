//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> évaluation post-ordre (f64)
//!
//! Aucune étape n'a d'effet de bord : même chaîne d'entrée, même
//! résultat. Toute cause de rejet traverse le pipeline comme variante
//! d'ErreurEval, jamais comme texte libre.

use super::erreur::ErreurEval;
use super::format::format_expr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{depuis_rpn, en_rpn};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub note: String,
}

/// API minimale : évalue une expression en valeur f64 finie.
pub fn evaluer(expr_str: &str) -> Result<f64, ErreurEval> {
    evaluer_expression(expr_str).map(|(v, _d)| v)
}

/// API complète : valeur + démarche (jetons, RPN, arbre reconstruit).
pub fn evaluer_expression(expr_str: &str) -> Result<(f64, DemarcheNoyau), ErreurEval> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::EntreeVide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);

    // 2) RPN
    let rpn = en_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);

    // 3) AST (Expr)
    let expr = depuis_rpn(&rpn)?;

    // 4) Évaluation (division par zéro + domaines vérifiés par prédicat)
    let valeur = expr.evaluer()?;

    // 5) Démarche
    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        arbre: format_expr(&expr),
        note: "Pipeline: jetons → RPN → Expr → évaluation f64.".into(),
    };

    Ok((valeur, d))
}

#[cfg(test)]
mod tests {
    use super::evaluer;
    use crate::noyau::erreur::ErreurEval;

    fn ok(s: &str) -> f64 {
        evaluer(s).unwrap_or_else(|e| panic!("evaluer({s:?}) erreur: {e}"))
    }

    fn err(s: &str) -> ErreurEval {
        match evaluer(s) {
            Ok(v) => panic!("evaluer({s:?}) devrait échouer, a rendu {v}"),
            Err(e) => e,
        }
    }

    fn assert_proche(s: &str, attendu: f64) {
        let v = ok(s);
        assert!((v - attendu).abs() < 1e-12, "expr={s:?} v={v} attendu={attendu}");
    }

    // --- Littéraux ---

    #[test]
    fn litteraux_simples() {
        assert_eq!(ok("42"), 42.0);
        assert_eq!(ok("3.5"), 3.5);
        assert_eq!(ok("0"), 0.0);
        assert_eq!(ok("  7  "), 7.0);
    }

    #[test]
    fn entree_vide() {
        assert_eq!(err(""), ErreurEval::EntreeVide);
        assert_eq!(err("   "), ErreurEval::EntreeVide);
    }

    // --- Précédence + parenthèses ---

    #[test]
    fn precedence_mul_sur_add() {
        assert_eq!(ok("2+3×4"), 14.0);
        assert_eq!(ok("2+3*4"), 14.0);
    }

    #[test]
    fn parentheses_prioritaires() {
        assert_eq!(ok("(2+3)×4"), 20.0);
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(ok("-5"), -5.0);
        assert_eq!(ok("-(2+3)"), -5.0);
        assert_eq!(ok("3+-2"), 1.0);
    }

    // --- Division ---

    #[test]
    fn division_par_zero() {
        assert_eq!(err("5÷0"), ErreurEval::DivisionParZero);
        assert_eq!(err("5/0"), ErreurEval::DivisionParZero);
        assert_eq!(err("1/(2-2)"), ErreurEval::DivisionParZero);
        assert_eq!(ok("0÷5"), 0.0);
    }

    // --- Fonctions ---

    #[test]
    fn sqrt_domaine() {
        assert_eq!(ok("sqrt(4)"), 2.0);
        assert!(matches!(err("sqrt(-1)"), ErreurEval::HorsDomaine(_)));
    }

    #[test]
    fn ln_domaine() {
        assert_eq!(ok("ln(1)"), 0.0);
        assert_eq!(ok("log(1)"), 0.0);
        assert!(matches!(err("ln(0)"), ErreurEval::HorsDomaine(_)));
        assert!(matches!(err("ln(-2)"), ErreurEval::HorsDomaine(_)));
    }

    #[test]
    fn trig_et_exp() {
        assert_proche("sin(0)", 0.0);
        assert_proche("cos(0)", 1.0);
        assert_proche("tan(0)", 0.0);
        assert_proche("exp(0)", 1.0);
        assert_proche("exp(1)", std::f64::consts::E);
    }

    #[test]
    fn pow_binaire() {
        assert_eq!(ok("pow(2,10)"), 1024.0);
        assert_proche("pow(2, 0.5)", std::f64::consts::SQRT_2);
        assert_eq!(ok("pow(2+2, 2)"), 16.0);
    }

    #[test]
    fn pow_arite() {
        assert!(matches!(err("pow(2)"), ErreurEval::Syntaxe(_)));
        assert!(matches!(err("sin(1,2)"), ErreurEval::Syntaxe(_)));
    }

    #[test]
    fn fonction_inconnue() {
        assert_eq!(err("foo(1)"), ErreurEval::FonctionInconnue("foo".into()));
    }

    #[test]
    fn fonction_dans_expression() {
        assert_proche("1+sqrt(4)×3", 7.0);
        assert_proche("sqrt(sqrt(16))", 2.0);
    }

    // --- Syntaxe ---

    #[test]
    fn parentheses_desequilibrees() {
        assert!(matches!(err("((1+2)"), ErreurEval::Syntaxe(_)));
        assert!(matches!(err("1+2)"), ErreurEval::Syntaxe(_)));
    }

    #[test]
    fn operandes_adjacents() {
        assert!(matches!(err("2 3"), ErreurEval::Syntaxe(_)));
        assert!(matches!(err("2(3)"), ErreurEval::Syntaxe(_)));
    }

    #[test]
    fn virgule_hors_appel() {
        assert!(matches!(err("1,2"), ErreurEval::Syntaxe(_)));
        assert!(matches!(err("(1,2)"), ErreurEval::Syntaxe(_)));
    }

    // --- Non-fini ---

    #[test]
    fn resultat_non_fini_rejete() {
        assert!(matches!(err("exp(100000)"), ErreurEval::HorsDomaine(_)));
        assert!(matches!(err("pow(0,-1)"), ErreurEval::HorsDomaine(_)));
    }

    // --- Idempotence ---

    #[test]
    fn reevaluation_identique() {
        for s in ["2+3×4", "sqrt(2)", "5÷0", "foo(1)", ""] {
            assert_eq!(evaluer(s), evaluer(s), "expr={s:?}");
        }
    }
}
