//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (longueur de chaîne, nombre de termes)
//! - énumération exhaustive des séquences de saisie COURTES (l'invariant
//!   d'adjacence doit tenir pour toute séquence, on le vérifie sur tout
//!   l'alphabet jusqu'à la longueur 4)

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::evaluer;
use super::jetons::Fonction;
use super::saisie::{Composeur, Jeton, Operateur};

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_eval(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} v={v} attendu={attendu}"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence + associativité ------------------------ */

#[test]
fn sci_precedence_complete() {
    assert_eval("2+3×4-6÷2", 11.0);
    assert_eval("2×3+4×5", 26.0);
    assert_eval("(2+3)×(4-1)", 15.0);
}

#[test]
fn sci_associativite_gauche() {
    assert_eval("10-2-3", 5.0);
    assert_eval("12÷2÷3", 2.0);
    assert_eval("100÷10×2", 20.0);
}

#[test]
fn sci_fonctions_imbriquees() {
    assert_eval("sqrt(pow(3,2)+pow(4,2))", 5.0);
    assert_eval("ln(exp(1))", 1.0);
    assert_eval("cos(sin(0))", 1.0);
    assert_eval("pow(pow(2,2),2)", 16.0);
}

/* ------------------------ Domaines (table) ------------------------ */

#[test]
fn sci_campagne_domaines() {
    let cas: &[(&str, fn(&ErreurEval) -> bool)] = &[
        ("5÷0", |e| *e == ErreurEval::DivisionParZero),
        ("1÷(3-3)", |e| *e == ErreurEval::DivisionParZero),
        ("sqrt(-4)", |e| matches!(e, ErreurEval::HorsDomaine(_))),
        ("ln(0)", |e| matches!(e, ErreurEval::HorsDomaine(_))),
        ("log(-1)", |e| matches!(e, ErreurEval::HorsDomaine(_))),
        ("exp(12345)", |e| matches!(e, ErreurEval::HorsDomaine(_))),
        ("bar(2)", |e| {
            *e == ErreurEval::FonctionInconnue("bar".into())
        }),
        ("", |e| *e == ErreurEval::EntreeVide),
        ("(1+2", |e| matches!(e, ErreurEval::Syntaxe(_))),
        ("pow(1)", |e| matches!(e, ErreurEval::Syntaxe(_))),
    ];

    for (expr, attendu) in cas {
        match evaluer(expr) {
            Ok(v) => panic!("expr={expr:?} aurait dû échouer, a rendu {v}"),
            Err(e) => assert!(attendu(&e), "expr={expr:?} err inattendue: {e}"),
        }
    }
}

#[test]
fn sci_tan_ne_touche_pas_le_pole() {
    // en f64, π/2 n'est pas représentable exactement : tan y reste fini
    let v = eval_ok("tan(1.5707963267948966)");
    assert!(v.is_finite());
    assert!(v.abs() > 1e15);
}

/* ------------------------ Saisie : énumération exhaustive ------------------------ */

const OPERATEUR_CHARS: [char; 4] = ['+', '-', '×', '÷'];

fn alphabet() -> Vec<Jeton> {
    vec![
        Jeton::Chiffre('2'),
        Jeton::Chiffre('.'),
        Jeton::Operateur(Operateur::Plus),
        Jeton::Operateur(Operateur::Moins),
        Jeton::Operateur(Operateur::Fois),
        Jeton::Operateur(Operateur::Division),
        Jeton::Fonction(Fonction::Sin),
        Jeton::Fonction(Fonction::Pow),
        Jeton::ParOuvrante,
        Jeton::ParFermante,
        Jeton::Virgule,
    ]
}

fn verifie_invariants(c: &Composeur) {
    let s = c.entree();

    // 1) jamais deux opérateurs adjacents dans le tampon
    let chars: Vec<char> = s.chars().collect();
    for w in chars.windows(2) {
        assert!(
            !(OPERATEUR_CHARS.contains(&w[0]) && OPERATEUR_CHARS.contains(&w[1])),
            "opérateurs adjacents dans {s:?}"
        );
    }

    // 2) aucun préfixe du tampon ne ferme plus qu'il n'ouvre
    let mut p: i64 = 0;
    for ch in &chars {
        match ch {
            '(' => p += 1,
            ')' => p -= 1,
            _ => {}
        }
        assert!(p >= 0, "fermante orpheline dans {s:?}");
    }

    // 3) la profondeur annoncée correspond au tampon
    assert_eq!(c.profondeur() as i64, p, "profondeur désynchronisée: {s:?}");
}

#[test]
fn sci_saisie_toutes_sequences_courtes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let alpha = alphabet();
    let n = alpha.len();

    for longueur in 1..=4usize {
        let total = n.pow(longueur as u32);
        for code in 0..total {
            let mut c = Composeur::new();
            let mut reste = code;
            for _ in 0..longueur {
                c.inserer(alpha[reste % n]);
                reste /= n;
            }
            verifie_invariants(&c);

            // si l'évaluation accepte le tampon, la valeur est finie
            if let Ok(v) = evaluer(c.entree()) {
                assert!(v.is_finite(), "valeur non finie pour {:?}", c.entree());
            }
        }
        budget(t0, max);
    }
}

#[test]
fn sci_saisie_effacements_en_serie() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let alpha = alphabet();
    let n = alpha.len();

    // compose une séquence, efface tout, l'état doit revenir à zéro
    for code in 0..n.pow(3) {
        let mut c = Composeur::new();
        let mut reste = code;
        for _ in 0..3 {
            c.inserer(alpha[reste % n]);
            reste /= n;
        }

        let mut garde = 0;
        while !c.est_vide() {
            c.effacer_dernier();
            verifie_invariants(&c);
            garde += 1;
            assert!(garde < 64, "effacement ne termine pas");
        }
        assert_eq!(c.profondeur(), 0);

        budget(t0, max);
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for k in 0..120 {
        if k > 0 {
            expr.push('+');
        }
        expr.push('1');
        budget(t0, max);
    }

    assert_eval(&expr, 120.0);
}

#[test]
fn sci_stress_litteral_enorme_rejete() {
    // un littéral à 400 chiffres déborde f64 : rejet propre, pas d'inf
    let expr = "9".repeat(400);
    assert!(matches!(
        evaluer(&expr),
        Err(ErreurEval::HorsDomaine(_))
    ));
}

#[test]
fn sci_stress_parentheses_profondes_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for _ in 0..200 {
        expr.push('(');
    }
    expr.push('7');
    for _ in 0..200 {
        expr.push(')');
    }
    budget(t0, max);

    assert_eval(&expr, 7.0);
}
