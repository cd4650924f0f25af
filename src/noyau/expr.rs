// src/noyau/expr.rs
//
// AST flottant (f64).
// - Nombre : littéral décimal
// - Sqrt/Sin/Cos/Tan/Exp/Ln : fonctions unaires
// - Pow : seule fonction binaire (base, exposant)
// - Add/Sub/Mul/Div : opérateurs binaires
//
// IMPORTANT (SAFE):
// - La division par zéro est testée AVANT la division (prédicat),
//   jamais rattrapée après coup.
// - Toute valeur non finie (±inf, NaN) produite par une étape est
//   convertie en erreur de domaine : aucun inf/NaN ne sort du noyau.

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Sqrt(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Exp(Box<Expr>),
    Ln(Box<Expr>),

    Pow(Box<Expr>, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

/// Garde-fou : toute étape doit produire une valeur finie.
fn fini(v: f64) -> Result<f64, ErreurEval> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::domaine("résultat non fini"))
    }
}

impl Expr {
    /// Évaluation post-ordre, sans effet de bord.
    pub fn evaluer(&self) -> Result<f64, ErreurEval> {
        use Expr::*;

        match self {
            Nombre(v) => fini(*v),

            Add(a, b) => fini(a.evaluer()? + b.evaluer()?),
            Sub(a, b) => fini(a.evaluer()? - b.evaluer()?),
            Mul(a, b) => fini(a.evaluer()? * b.evaluer()?),

            Div(a, b) => {
                let va = a.evaluer()?;
                let vb = b.evaluer()?;
                if vb == 0.0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                fini(va / vb)
            }

            Sqrt(x) => {
                let v = x.evaluer()?;
                if v < 0.0 {
                    return Err(ErreurEval::domaine("racine carrée d'un nombre négatif"));
                }
                fini(v.sqrt())
            }

            Ln(x) => {
                let v = x.evaluer()?;
                if v <= 0.0 {
                    return Err(ErreurEval::domaine(
                        "logarithme d'un nombre non strictement positif",
                    ));
                }
                fini(v.ln())
            }

            Sin(x) => fini(x.evaluer()?.sin()),
            Cos(x) => fini(x.evaluer()?.cos()),
            Tan(x) => fini(x.evaluer()?.tan()),
            Exp(x) => fini(x.evaluer()?.exp()),

            Pow(base, expo) => {
                let b = base.evaluer()?;
                let e = expo.evaluer()?;
                fini(b.powf(e))
            }
        }
    }
}
