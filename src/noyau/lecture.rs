// src/noyau/lecture.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

/// Précision de travail : chiffres significatifs portés par chaque résultat
/// arithmétique (l'équivalent d'un contexte décimal 64 bits).
pub const CHIFFRES_TRAVAIL: usize = 16;

/// Échelle d'affichage : décimales conservées (arrondi vers −∞) avant
/// suppression des zéros de fin.
pub const DECIMALES_AFFICHAGE: usize = 10;

pub(crate) fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Nombre de chiffres décimaux de |n| (1 pour zéro).
fn nb_chiffres(n: &BigInt) -> i64 {
    n.magnitude().to_str_radix(10).len() as i64
}

fn est_impair(n: &BigInt) -> bool {
    (n % BigInt::from(2)) == BigInt::one()
}

/// q / 10^k sous forme rationnelle (k peut être négatif).
fn depuis_scalaire(q: BigInt, k: i64) -> BigRational {
    if k >= 0 {
        BigRational::new(q, pow10(k as usize))
    } else {
        BigRational::from_integer(q * pow10((-k) as usize))
    }
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier scalé = arrondi vers −∞ de r * 10^digits (FLOOR, pas troncature).
fn rational_scaled_floor(r: &BigRational, digits: usize) -> BigInt {
    let num = r.numer() * pow10(digits);
    let den = r.denom();

    let mut q = &num / den;
    if num.is_negative() && &q * den != num {
        q -= 1u32;
    }
    q
}

/// Affichage d'une opérande : FLOOR à DECIMALES_AFFICHAGE décimales, zéros de
/// fin puis point final retirés, notation plate (jamais d'exposant).
pub fn formate_decimal(r: &BigRational) -> String {
    let brut = scaled_to_decimal(
        rational_scaled_floor(r, DECIMALES_AFFICHAGE),
        DECIMALES_AFFICHAGE,
    );
    if brut.contains('.') {
        brut.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        brut
    }
}

/* ------------------------ Arrondi significatif ------------------------ */

/// Arrondit r à `chiffres` chiffres significatifs, au pair le plus proche.
///
/// C'est l'étape de précision de travail : appliquée après chaque opération,
/// elle reproduit une arithmétique décimale à précision fixe tout en gardant
/// les valeurs sous forme rationnelle (un résultat qui tient déjà dans la
/// précision ressort inchangé).
pub fn arrondi_significatif(r: &BigRational, chiffres: usize) -> BigRational {
    if r.is_zero() {
        return r.clone();
    }

    let negatif = r.is_negative();
    let n = r.numer().abs();
    let d = r.denom().clone();

    // échelle estimée par comptage de chiffres, puis ajustée d'un cran
    let mut k = chiffres as i64 - 1 - (nb_chiffres(&n) - nb_chiffres(&d));
    let (mut q, mut num, mut den);
    loop {
        if k >= 0 {
            num = &n * pow10(k as usize);
            den = d.clone();
        } else {
            num = n.clone();
            den = &d * pow10((-k) as usize);
        }
        q = &num / &den;

        let taille = if q.is_zero() { 0 } else { nb_chiffres(&q) };
        match taille.cmp(&(chiffres as i64)) {
            Ordering::Greater => k -= 1,
            Ordering::Less => k += 1,
            Ordering::Equal => break,
        }
    }

    // demi-pair sur le reste
    let reste = &num - &q * &den;
    let double = &reste + &reste;
    match double.cmp(&den) {
        Ordering::Greater => q += 1u32,
        Ordering::Equal => {
            if est_impair(&q) {
                q += 1u32;
            }
        }
        Ordering::Less => {}
    }

    let resultat = depuis_scalaire(q, k);
    if negatif {
        -resultat
    } else {
        resultat
    }
}

/* ------------------------ √ (scalée + arrondie) ------------------------ */

/// floor(√(n/d)) pour n ≥ 0, d > 0 — Newton entier avec ajustement final.
fn racine_entiere_floor(n: &BigInt, d: &BigInt) -> BigInt {
    if n.is_zero() {
        return BigInt::zero();
    }

    // point de départ : ordre de grandeur du quotient
    let moitie = ((nb_chiffres(n) - nb_chiffres(d)).max(0) / 2) as usize + 1;
    let mut y = pow10(moitie);

    loop {
        let denom = d * &y;
        let q = n / &denom;
        let y_next: BigInt = (&y + q) >> 1;

        if y_next == y || y_next == (&y - 1u32) {
            // ajustement final (floor)
            let mut y_adj = y_next;

            while (&y_adj + 1u32) * (&y_adj + 1u32) * d <= *n {
                y_adj += 1u32;
            }
            while &y_adj * &y_adj * d > *n {
                y_adj -= 1u32;
            }
            return y_adj;
        }

        y = y_next;
    }
}

fn carre_parfait(n: &BigInt) -> Option<BigInt> {
    let r = racine_entiere_floor(n, &BigInt::one());
    if &r * &r == *n {
        Some(r)
    } else {
        None
    }
}

/// √r à CHIFFRES_TRAVAIL chiffres significatifs (pair le plus proche),
/// exacte si r est le carré d'un rationnel.
pub fn racine(r: &BigRational) -> Result<BigRational, String> {
    if r.is_negative() {
        return Err("square root of a negative number".to_string());
    }
    if r.is_zero() {
        return Ok(r.clone());
    }

    // carré parfait : résultat exact, aucun arrondi
    if let (Some(rn), Some(rd)) = (carre_parfait(r.numer()), carre_parfait(r.denom())) {
        return Ok(BigRational::new(rn, rd));
    }

    // ordre de grandeur avec chiffres de garde (doublés tant que √r est trop
    // petite pour apparaître à cette échelle)
    let mut garde: usize = 8;
    let approx = loop {
        let a = racine_entiere_floor(&(r.numer() * pow10(2 * garde)), r.denom());
        if !a.is_zero() {
            break a;
        }
        garde *= 2;
    };

    // s = floor(√r · 10^k), ajusté pour porter exactement CHIFFRES_TRAVAIL chiffres
    let mut k = CHIFFRES_TRAVAIL as i64 - nb_chiffres(&approx) + garde as i64;
    let (mut s, mut num, mut den);
    loop {
        if k >= 0 {
            num = r.numer() * pow10(2 * k as usize);
            den = r.denom().clone();
        } else {
            num = r.numer().clone();
            den = r.denom() * pow10(2 * (-k) as usize);
        }
        s = racine_entiere_floor(&num, &den);

        let taille = if s.is_zero() { 0 } else { nb_chiffres(&s) };
        match taille.cmp(&(CHIFFRES_TRAVAIL as i64)) {
            Ordering::Greater => k -= 1,
            Ordering::Less => k += 1,
            Ordering::Equal => break,
        }
    }

    // au plus proche : monte ssi √(num/den) − s ≥ 1/2 ⇔ 4·num ≥ den·(2s+1)²
    // (l'égalité exigerait un carré parfait, traité plus haut)
    let seuil = &s + &s + 1u32;
    match (num * 4u32).cmp(&(&seuil * &seuil * &den)) {
        Ordering::Greater => s += 1u32,
        Ordering::Equal => {
            if est_impair(&s) {
                s += 1u32;
            }
        }
        Ordering::Less => {}
    }

    Ok(depuis_scalaire(s, k))
}
