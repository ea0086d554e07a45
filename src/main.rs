// src/main.rs
//
// Calculatrice NPI — point d'entrée console
// -----------------------------------------
// Rôle : boucle fine seulement. Lit l'entrée ligne par ligne, délègue tout au
// noyau (une seule machine, l'état traverse les lignes), affiche la pile
// rendue après les diagnostics éventuels. Aucune logique de calcul ici.

use std::io::{self, BufRead};

mod noyau;

use noyau::Evaluateur;

fn main() -> io::Result<()> {
    env_logger::builder().format_timestamp(None).init();

    let entree = io::stdin();
    let mut calculatrice = Evaluateur::new();

    for ligne in entree.lock().lines() {
        let ligne = ligne?;
        println!("{}", calculatrice.calcule(&ligne));
    }

    Ok(())
}
