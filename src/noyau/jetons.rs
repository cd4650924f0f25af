// src/noyau/jetons.rs

use super::erreur::ErreurEval;

/// Fonctions reconnues par le noyau (ensemble fermé).
///
/// NOTE: la résolution nom -> variante se fait ICI, à la tokenisation.
/// Un identifiant hors de cette liste est rejeté (FonctionInconnue),
/// jamais transmis plus loin dans le pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Pow,
}

impl Fonction {
    /// Résout un nom (déjà en minuscules) vers une fonction connue.
    /// "log" est un alias de ln (logarithme népérien).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "sqrt" => Some(Fonction::Sqrt),
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "exp" => Some(Fonction::Exp),
            "ln" | "log" => Some(Fonction::Ln),
            "pow" => Some(Fonction::Pow),
            _ => None,
        }
    }

    pub fn nom(&self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Exp => "exp",
            Fonction::Ln => "ln",
            Fonction::Pow => "pow",
        }
    }

    /// Nombre d'arguments attendus (pow est la seule fonction binaire).
    pub fn arite(&self) -> usize {
        match self {
            Fonction::Pow => 2,
            _ => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Tok {
    Num(f64),
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Comma,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, 5.) — au plus UN point par littéral
/// - opérateurs + - × ÷ (alias clavier: * /, moins unicode: −)
/// - parenthèses ( ) et virgule (séparateur d'arguments de pow)
/// - noms de fonctions [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses + virgule
        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Comma);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Opérateurs (glyphes d'affichage + alias clavier)
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' | '−' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' | '×' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' | '÷' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Noms de fonctions : [a-zA-Z_][a-zA-Z0-9_]*
        // Le scan avale le mot entier (plus longue correspondance),
        // puis résolution dans l'ensemble fermé.
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match Fonction::depuis_nom(&w) {
                Some(f) => out.push(Tok::Fonction(f)),
                None => return Err(ErreurEval::FonctionInconnue(w)),
            }
            continue;
        }

        // Littéral numérique : chiffres + au plus un point.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut points = 0usize;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    points += 1;
                }
                i += 1;
            }
            let lit: String = chars[start..i].iter().collect();

            if points > 1 {
                return Err(ErreurEval::syntaxe(format!("nombre invalide: '{lit}'")));
            }
            let v: f64 = lit
                .parse()
                .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: '{lit}'")))?;

            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (panneau “démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => super::format::format_nombre_brut(*v),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "×".to_string(),
            Tok::Slash => "÷".to_string(),
            Tok::Comma => ",".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nombres_et_operateurs() {
        let toks = tokenize("1.5 + 2×3").unwrap();
        assert_eq!(toks.len(), 5);
        assert!(matches!(toks[0], Tok::Num(v) if v == 1.5));
        assert!(matches!(toks[2], Tok::Num(v) if v == 2.0));
        assert!(matches!(toks[3], Tok::Star));
    }

    #[test]
    fn alias_operateurs() {
        // * et / (clavier) équivalent à × et ÷ (boutons)
        let a = format_tokens(&tokenize("6*2/3").unwrap());
        let b = format_tokens(&tokenize("6×2÷3").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn fonction_connue_et_alias_log() {
        let toks = tokenize("ln(1)").unwrap();
        assert!(matches!(toks[0], Tok::Fonction(Fonction::Ln)));
        let toks = tokenize("LOG(1)").unwrap();
        assert!(matches!(toks[0], Tok::Fonction(Fonction::Ln)));
    }

    #[test]
    fn fonction_inconnue_rejetee() {
        let err = tokenize("foo(1)").unwrap_err();
        assert_eq!(err, ErreurEval::FonctionInconnue("foo".into()));
    }

    #[test]
    fn litteral_deux_points_rejete() {
        let err = tokenize("1.2.3").unwrap_err();
        assert!(matches!(err, ErreurEval::Syntaxe(_)));
    }

    #[test]
    fn caractere_inattendu() {
        let err = tokenize("2 # 3").unwrap_err();
        assert!(matches!(err, ErreurEval::Syntaxe(_)));
    }
}
