// src/noyau/format.rs

use super::expr::Expr;

/* ------------------------ Nombres ------------------------ */

/// Affichage d'un résultat : précision fixe, zéros de queue retirés.
/// `decimales` est la précision maximale demandée par l'UI.
pub fn format_nombre(v: f64, decimales: usize) -> String {
    let s = format!("{v:.decimales$}");

    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };

    // -0 n'apporte rien à l'écran
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Affichage “court” (jetons, arbre) : forme la plus courte qui relit pareil.
pub fn format_nombre_brut(v: f64) -> String {
    let s = format!("{v}");
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/* ------------------------ Arbre (panneau démarche) ------------------------ */

/// Formate l'arbre reconstruit depuis la RPN, parenthèses explicites.
pub fn format_expr(e: &Expr) -> String {
    use Expr::*;

    match e {
        Nombre(v) => format_nombre_brut(*v),

        Sqrt(x) => format!("sqrt({})", format_expr(x)),
        Sin(x) => format!("sin({})", format_expr(x)),
        Cos(x) => format!("cos({})", format_expr(x)),
        Tan(x) => format!("tan({})", format_expr(x)),
        Exp(x) => format!("exp({})", format_expr(x)),
        Ln(x) => format!("ln({})", format_expr(x)),

        Pow(b, e) => format!("pow({}, {})", format_expr(b), format_expr(e)),

        Add(a, b) => format!("({}+{})", format_expr(a), format_expr(b)),
        Sub(a, b) => format!("({}-{})", format_expr(a), format_expr(b)),
        Mul(a, b) => format!("({}×{})", format_expr(a), format_expr(b)),
        Div(a, b) => format!("({}÷{})", format_expr(a), format_expr(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_de_queue_retires() {
        assert_eq!(format_nombre(2.0, 6), "2");
        assert_eq!(format_nombre(0.5, 6), "0.5");
        assert_eq!(format_nombre(1.0 / 3.0, 4), "0.3333");
    }

    #[test]
    fn moins_zero_normalise() {
        assert_eq!(format_nombre(-0.0, 6), "0");
        assert_eq!(format_nombre_brut(-0.0), "0");
    }

    #[test]
    fn precision_zero() {
        assert_eq!(format_nombre(14.0, 0), "14");
    }
}
