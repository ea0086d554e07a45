// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;

use super::lecture::pow10;

/// Garde-fou : borne sur l'exposant des littéraux (anti-gel — un exposant
/// au-delà matérialiserait des entiers gigantesques dès la poussée).
const EXPOSANT_MAX: i64 = 9_999;

/// Jeu fermé d'opérations, marqueur de poussée compris : c'est la même
/// étiquette qui circule dans le journal d'annulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Marqueur d'un nombre empilé (jamais un symbole d'entrée).
    Nombre,

    Addition,
    Soustraction,
    Multiplication,
    Division,
    Racine,

    // méta : agissent sur la machine, jamais journalisées
    Annulation,
    Effacement,
}

impl Operation {
    /// Symbole d'entrée -> opération. `None` si le jeton n'est pas reconnu.
    pub fn depuis_symbole(symbole: &str) -> Option<Operation> {
        match symbole {
            "+" => Some(Operation::Addition),
            "-" => Some(Operation::Soustraction),
            "*" => Some(Operation::Multiplication),
            "/" => Some(Operation::Division),
            "sqrt" => Some(Operation::Racine),
            "undo" => Some(Operation::Annulation),
            "clear" => Some(Operation::Effacement),
            _ => None,
        }
    }
}

/// Reconnaît un littéral décimal et le convertit en rationnel exact.
///
/// Grammaire : signe optionnel, chiffres de part et/ou d'autre d'un point
/// (au moins un chiffre en tout), exposant `e`/`E` optionnel avec signe.
/// "5", "-3.2", "5.", ".5", "1e3", "2E-4" passent ; "-" et "+" seuls ne sont
/// PAS des nombres et retombent sur la classification d'opérateur.
pub fn analyse_nombre(jeton: &str) -> Option<BigRational> {
    let chars: Vec<char> = jeton.chars().collect();
    let mut i: usize = 0;

    // signe
    let mut negatif = false;
    if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
        negatif = chars[i] == '-';
        i += 1;
    }

    // mantisse : partie entière puis fractionnaire, chiffres accumulés à plat
    let mut mantisse = String::new();
    while i < chars.len() && chars[i].is_ascii_digit() {
        mantisse.push(chars[i]);
        i += 1;
    }

    let mut decimales: usize = 0;
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        let debut = mantisse.len();
        while i < chars.len() && chars[i].is_ascii_digit() {
            mantisse.push(chars[i]);
            i += 1;
        }
        decimales = mantisse.len() - debut;
    }

    if mantisse.is_empty() {
        return None;
    }

    // exposant
    let mut exposant: i64 = 0;
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        i += 1;

        let mut exp_negatif = false;
        if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            exp_negatif = chars[i] == '-';
            i += 1;
        }

        let debut = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if debut == i {
            return None;
        }

        let texte: String = chars[debut..i].iter().collect();
        exposant = texte.parse::<i64>().ok()?;
        if exp_negatif {
            exposant = -exposant;
        }
        if exposant.abs() > EXPOSANT_MAX {
            return None;
        }
    }

    // le littéral doit être consommé en entier
    if i != chars.len() {
        return None;
    }

    let n = BigInt::parse_bytes(mantisse.as_bytes(), 10)?;
    let echelle = exposant - decimales as i64;
    let mut valeur = if echelle >= 0 {
        BigRational::from_integer(n * pow10(echelle as usize))
    } else {
        BigRational::new(n, pow10((-echelle) as usize))
    };
    if negatif {
        valeur = -valeur;
    }
    Some(valeur)
}
