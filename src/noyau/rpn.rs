// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Fonction(f) : opérateur “collé” à son argument, sortie après la
//   parenthèse fermante de son appel.
// - Virgule : sépare les arguments d'un appel (pow), dépile jusqu'à '('.
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, on injecte 0 : "-x" => "0 x -"
// - Arité : vérifiée à la reconstruction. Pile trop courte pour une
//   fonction, ou pile finale non réduite à un seul élément
//   => expression invalide.

use super::erreur::ErreurEval;
use super::expr::Expr;
use super::jetons::{Fonction, Tok};

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(1), Slash, Num(2), RPar]
///   rpn:    [Num(1), Num(2), Slash, Fonction(Sin)]
pub fn en_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(_) => {
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouvrante_trouvee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_trouvee = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_trouvee {
                    return Err(ErreurEval::syntaxe("parenthèse fermante inattendue"));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Fonction(_)) = ops.last() {
                    out.push(ops.pop().unwrap());
                }

                prev_was_value = true;
            }

            Tok::Comma => {
                // fin d'argument : dépile jusqu'à '(' (qu'on laisse en place)
                loop {
                    match ops.last() {
                        Some(Tok::LPar) => break,
                        Some(_) => out.push(ops.pop().unwrap()),
                        None => {
                            return Err(ErreurEval::syntaxe("virgule hors parenthèses"));
                        }
                    }
                }
                prev_was_value = false;
            }

            Tok::Plus | Tok::Star | Tok::Slash => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonction(_)) {
                        break;
                    }
                    if precedence(top) >= precedence(&tok) {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Minus => {
                // moins unaire : si pas de valeur avant, injecte 0
                if !prev_was_value {
                    out.push(Tok::Num(0.0));
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonction(_)) {
                        break;
                    }
                    if precedence(top) >= precedence(&Tok::Minus) {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(Tok::Minus);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// - Fonction(f) : dépile arite() opérandes (pow en prend deux).
/// - Deux opérandes adjacents sans opérateur laissent une pile finale
///   de taille != 1 => expression invalide.
pub fn depuis_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                let a = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::Fonction(f) => {
                if st.len() < f.arite() {
                    return Err(ErreurEval::syntaxe(format!(
                        "{}: nombre d'arguments incorrect",
                        f.nom()
                    )));
                }

                let e = match f {
                    Fonction::Pow => {
                        let expo = Box::new(st.pop().unwrap());
                        let base = Box::new(st.pop().unwrap());
                        Expr::Pow(base, expo)
                    }
                    _ => {
                        let x = Box::new(st.pop().unwrap());
                        match f {
                            Fonction::Sqrt => Expr::Sqrt(x),
                            Fonction::Sin => Expr::Sin(x),
                            Fonction::Cos => Expr::Cos(x),
                            Fonction::Tan => Expr::Tan(x),
                            Fonction::Exp => Expr::Exp(x),
                            Fonction::Ln => Expr::Ln(x),
                            Fonction::Pow => unreachable!(),
                        }
                    }
                };
                st.push(e);
            }

            Tok::LPar | Tok::RPar | Tok::Comma => {
                return Err(ErreurEval::syntaxe("jeton inattendu en RPN"));
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurEval::syntaxe("expression invalide"));
    }
    Ok(st.pop().unwrap())
}
