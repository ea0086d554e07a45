//! Campagne calculatrice : propriétés observables de la machine NPI.
//!
//! But : vérifier le contrat complet par le seul canal public
//! (`calcule_vers` + affichage de pile + diagnostics), sans regarder
//! l'état interne.
//! - affichage décimal (plancher à 10 décimales, zéros retirés)
//! - annulation (nombre / unaire / binaire) et effacement
//! - fautes locales au jeton : la ligne continue, la position n'avance pas
//! - persistance de l'état d'une ligne à l'autre

use pretty_assertions::assert_eq;

use super::eval::Evaluateur;

/// Rejoue chaque ligne sur une même machine ; rend (dernier affichage, fautes).
fn rejoue(lignes: &[&str]) -> (String, String) {
    let mut calc = Evaluateur::new();
    let mut diag: Vec<u8> = Vec::new();

    let mut affichage = String::from("stack:");
    for ligne in lignes {
        affichage = calc.calcule_vers(ligne, &mut diag);
    }
    (affichage, String::from_utf8(diag).expect("diagnostics utf-8"))
}

/// Comme `rejoue`, en exigeant qu'aucune faute ne soit émise.
fn pile_finale(lignes: &[&str]) -> String {
    let (affichage, fautes) = rejoue(lignes);
    assert_eq!(fautes, "", "fautes inattendues pour {lignes:?}");
    affichage
}

/* ------------------------ Empilement + affichage ------------------------ */

#[test]
fn empile_nombres() {
    assert_eq!(pile_finale(&["5", "3"]), "stack: 5 3");
    assert_eq!(pile_finale(&["5 2"]), "stack: 5 2");
}

#[test]
fn pile_vide_affichee_nue() {
    assert_eq!(pile_finale(&[]), "stack:");
    assert_eq!(pile_finale(&["clear"]), "stack:");
}

#[test]
fn affichage_idempotent() {
    let mut calc = Evaluateur::new();
    let mut diag: Vec<u8> = Vec::new();
    calc.calcule_vers("1 3 /", &mut diag);
    let premier = calc.affiche_pile();
    let second = calc.affiche_pile();
    assert_eq!(premier, second);
    assert_eq!(premier, "stack: 0.3333333333");
}

#[test]
fn litteral_pousse_a_pleine_precision() {
    // pas d'arrondi à la poussée ; seul l'affichage tronque
    assert_eq!(
        pile_finale(&["1.2345678901234567890"]),
        "stack: 1.2345678901"
    );
}

#[test]
fn notation_scientifique() {
    assert_eq!(pile_finale(&["1e3 2.5e-3 +"]), "stack: 1000.0025");
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn addition_simple() {
    assert_eq!(pile_finale(&["3 4 +"]), "stack: 7");
}

#[test]
fn soustraction_en_deux_lignes() {
    assert_eq!(pile_finale(&["5 2 -"]), "stack: 3");
    assert_eq!(pile_finale(&["5 2 -", "3 -"]), "stack: 0");
    assert_eq!(pile_finale(&["clear 3 4 -"]), "stack: -1");
}

#[test]
fn division_tronquee() {
    // 16 chiffres de travail, plancher à 10 décimales à l'affichage
    assert_eq!(pile_finale(&["1 3 /"]), "stack: 0.3333333333");
    // le plancher va vers −∞ sur les négatifs
    assert_eq!(pile_finale(&["-1 3 /"]), "stack: -0.3333333334");
}

#[test]
fn division_enchainee() {
    assert_eq!(pile_finale(&["7 12 2 /"]), "stack: 7 6");
    assert_eq!(pile_finale(&["7 12 2 /", "*"]), "stack: 42");
    assert_eq!(pile_finale(&["7 12 2 /", "*", "4 /"]), "stack: 10.5");
}

#[test]
fn multiplications_en_serie() {
    assert_eq!(pile_finale(&["1 2 3 4 5", "*"]), "stack: 1 2 3 20");
    assert_eq!(pile_finale(&["1 2 3 4 5", "* * * *"]), "stack: 120");
}

#[test]
fn racine_carree() {
    assert_eq!(pile_finale(&["2 sqrt"]), "stack: 1.4142135623");
    assert_eq!(pile_finale(&["9 sqrt"]), "stack: 3");
}

#[test]
fn racine_puis_carre_rearrondi() {
    // (√2 à 16 chiffres)² repasse à 2 exactement après l'arrondi demi-pair
    assert_eq!(pile_finale(&["2 sqrt 2 sqrt *"]), "stack: 2");
}

/* ------------------------ Annulation + effacement ------------------------ */

#[test]
fn annulation_nombre() {
    assert_eq!(pile_finale(&["5 3 undo"]), "stack: 5");
}

#[test]
fn annulation_binaire_restaure_les_deux() {
    assert_eq!(pile_finale(&["3 4 + undo"]), "stack: 3 4");
}

#[test]
fn annulation_racine() {
    assert_eq!(pile_finale(&["9 sqrt undo"]), "stack: 9");
}

#[test]
fn annulation_en_serie() {
    assert_eq!(pile_finale(&["5 4 3 2", "undo undo *"]), "stack: 20");
    assert_eq!(pile_finale(&["5 4 3 2", "undo undo *", "5 *"]), "stack: 100");
    assert_eq!(
        pile_finale(&["5 4 3 2", "undo undo *", "5 *", "undo"]),
        "stack: 20 5"
    );
}

#[test]
fn annulation_pile_vide_silencieuse() {
    assert_eq!(pile_finale(&["undo"]), "stack:");
    assert_eq!(pile_finale(&["undo undo undo"]), "stack:");
}

#[test]
fn effacement_vide_les_journaux() {
    assert_eq!(pile_finale(&["1 2 3", "clear"]), "stack:");
    // après clear, plus rien à défaire
    assert_eq!(pile_finale(&["3 4 +", "clear", "undo"]), "stack:");
}

/* ------------------------ Fautes (locales au jeton) ------------------------ */

#[test]
fn arite_insuffisante_pile_vide() {
    let (affichage, fautes) = rejoue(&["+"]);
    assert_eq!(fautes, "operator + (position: 0): insufficient parameters\n");
    assert_eq!(affichage, "stack:");

    let (affichage, fautes) = rejoue(&["sqrt"]);
    assert_eq!(
        fautes,
        "operator sqrt (position: 0): insufficient parameters\n"
    );
    assert_eq!(affichage, "stack:");
}

#[test]
fn operation_inconnue() {
    let (affichage, fautes) = rejoue(&["foo"]);
    assert_eq!(fautes, "Invalid operation: foo\n");
    assert_eq!(affichage, "stack:");
}

#[test]
fn ligne_vide_est_un_jeton_vide() {
    // règle héritée : découpe sur l'espace, une ligne blanche donne un jeton vide
    let (affichage, fautes) = rejoue(&[""]);
    assert_eq!(fautes, "Invalid operation: \n");
    assert_eq!(affichage, "stack:");
}

#[test]
fn faute_au_milieu_sans_arret() {
    // la position reportée est celle du compteur hérité (les fautes ne
    // l'avancent pas), et les jetons suivants sont encore traités
    let (affichage, fautes) = rejoue(&["1 2 3 * 5 + * * 6 5"]);
    assert_eq!(fautes, "operator * (position: 14): insufficient parameters\n");
    assert_eq!(affichage, "stack: 11 6 5");
}

#[test]
fn division_par_zero_signalee() {
    let (affichage, fautes) = rejoue(&["1 0 /"]);
    assert_eq!(fautes, "operator / (position: 4): division by zero\n");
    assert_eq!(affichage, "stack: 1 0");
}

#[test]
fn racine_de_negatif_signalee() {
    let (affichage, fautes) = rejoue(&["-9 sqrt"]);
    assert_eq!(
        fautes,
        "operator sqrt (position: 3): square root of a negative number\n"
    );
    assert_eq!(affichage, "stack: -9");
}

/* ------------------------ Persistance entre lignes ------------------------ */

#[test]
fn etat_conserve_entre_lignes() {
    assert_eq!(pile_finale(&["5", "3 +"]), "stack: 8");
    assert_eq!(pile_finale(&["2", "sqrt"]), "stack: 1.4142135623");
}
