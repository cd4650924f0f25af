//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - le générateur ne produit que des expressions grammaticales :
//!   les seules erreurs admises sont division par zéro et hors domaine
//! - invariant clé : Ok(v) => v est fini

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::evaluer;
use super::jetons::Fonction;
use super::saisie::{Composeur, Jeton, Operateur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(9);
    if rng.coin() {
        let b = rng.pick(10);
        format!("{a}.{b}")
    } else {
        format!("{a}")
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(6) {
        0 => gen_nombre(rng),

        // binaire : a op b
        1 | 2 => {
            let a = gen_expr(rng, profondeur - 1);
            let b = gen_expr(rng, profondeur - 1);
            let op = match rng.pick(4) {
                0 => '+',
                1 => '-',
                2 => '×',
                _ => '÷',
            };
            format!("{a}{op}{b}")
        }

        // parenthèses
        3 => format!("({})", gen_expr(rng, profondeur - 1)),

        // fonction unaire
        4 => {
            let f = match rng.pick(6) {
                0 => "sqrt",
                1 => "sin",
                2 => "cos",
                3 => "tan",
                4 => "exp",
                _ => "ln",
            };
            format!("{f}({})", gen_expr(rng, profondeur - 1))
        }

        // pow binaire
        _ => {
            let a = gen_expr(rng, profondeur - 1);
            let b = gen_expr(rng, profondeur - 1);
            format!("pow({a},{b})")
        }
    }
}

/// Liste blanche : erreurs *normales* pour des expressions grammaticales
/// sur un domaine volontairement limité.
fn est_erreur_attendue(e: &ErreurEval) -> bool {
    matches!(e, ErreurEval::DivisionParZero | ErreurEval::HorsDomaine(_))
}

/* ------------------------ Fuzz évaluation ------------------------ */

#[test]
fn fuzz_eval_grammatical_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..400 {
        let expr = gen_expr(&mut rng, 4);

        match evaluer(&expr) {
            Ok(v) => assert!(v.is_finite(), "Ok non fini pour {expr:?}"),
            Err(e) => assert!(
                est_erreur_attendue(&e),
                "erreur inattendue pour {expr:?}: {e}"
            ),
        }

        // idempotence : même chaîne, même résultat
        assert_eq!(evaluer(&expr), evaluer(&expr), "expr={expr:?}");

        budget(t0, max);
    }
}

#[test]
fn fuzz_eval_deterministe_entre_campagnes() {
    // deux campagnes avec la même seed doivent produire les mêmes chaînes
    let mut r1 = Rng::new(42);
    let mut r2 = Rng::new(42);
    for _ in 0..50 {
        assert_eq!(gen_expr(&mut r1, 3), gen_expr(&mut r2, 3));
    }
}

/* ------------------------ Fuzz saisie ------------------------ */

fn gen_jeton(rng: &mut Rng) -> Jeton {
    match rng.pick(12) {
        0..=2 => Jeton::Chiffre(char::from(b'0' + (rng.pick(10) as u8))),
        3 => Jeton::Chiffre('.'),
        4 => Jeton::Operateur(Operateur::Plus),
        5 => Jeton::Operateur(Operateur::Moins),
        6 => Jeton::Operateur(Operateur::Fois),
        7 => Jeton::Operateur(Operateur::Division),
        8 => {
            let f = match rng.pick(7) {
                0 => Fonction::Sqrt,
                1 => Fonction::Sin,
                2 => Fonction::Cos,
                3 => Fonction::Tan,
                4 => Fonction::Exp,
                5 => Fonction::Ln,
                _ => Fonction::Pow,
            };
            Jeton::Fonction(f)
        }
        9 => Jeton::ParOuvrante,
        10 => Jeton::ParFermante,
        _ => Jeton::Virgule,
    }
}

#[test]
fn fuzz_saisie_invariants_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    const OPERATEUR_CHARS: [char; 4] = ['+', '-', '×', '÷'];

    let mut rng = Rng::new(0xBADCAFE);

    for _ in 0..500 {
        let mut c = Composeur::new();
        let longueur = 1 + rng.pick(30);

        for _ in 0..longueur {
            // mélange insertions et effacements (1 sur 8)
            if rng.pick(8) == 0 {
                c.effacer_dernier();
            } else {
                c.inserer(gen_jeton(&mut rng));
            }

            // invariant : jamais deux opérateurs adjacents
            let chars: Vec<char> = c.entree().chars().collect();
            for w in chars.windows(2) {
                assert!(
                    !(OPERATEUR_CHARS.contains(&w[0]) && OPERATEUR_CHARS.contains(&w[1])),
                    "opérateurs adjacents dans {:?}",
                    c.entree()
                );
            }

            // invariant : profondeur cohérente avec le tampon
            let p = chars.iter().fold(0i64, |acc, ch| match ch {
                '(' => acc + 1,
                ')' => acc - 1,
                _ => acc,
            });
            assert!(p >= 0, "fermante orpheline dans {:?}", c.entree());
            assert_eq!(c.profondeur() as i64, p);
        }

        // l'évaluation du tampon ne panique jamais : Ok fini, ou erreur typée
        if let Ok(v) = evaluer(c.entree()) {
            assert!(v.is_finite());
        }

        budget(t0, max);
    }
}
