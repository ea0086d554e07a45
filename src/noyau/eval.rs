//! Noyau — la machine à pile NPI
//!
//! Une instance = une pile d'opérandes + deux journaux d'annulation :
//! - journal des valeurs : les opérandes consommées, dans l'ordre exact
//!   nécessaire pour défaire la dernière opération ;
//! - journal des opérations : quelle étiquette a produit chaque mutation
//!   (y compris le marqueur Nombre des poussées simples), pour que `undo`
//!   sache combien de valeurs restaurer.
//!
//! L'état persiste entre deux lignes : une expression peut se construire
//! sur plusieurs appels à `calcule`.

use std::io::{self, Write};

use log::debug;
use num_rational::BigRational;
use num_traits::Zero;

use super::erreurs::ErreurCalcul;
use super::jetons::{analyse_nombre, Operation};
use super::lecture::{arrondi_significatif, formate_decimal, racine, CHIFFRES_TRAVAIL};

#[derive(Clone, Debug, Default)]
pub struct Evaluateur {
    pile: Vec<BigRational>,
    journal_valeurs: Vec<BigRational>,
    journal_operations: Vec<Operation>,
}

impl Evaluateur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Traite une ligne ; les fautes partent sur stdout (cf. `calcule_vers`).
    pub fn calcule(&mut self, ligne: &str) -> String {
        let mut sortie = io::stdout();
        self.calcule_vers(ligne, &mut sortie)
    }

    /// Traite une ligne de jetons séparés par des espaces, de gauche à
    /// droite, et rend l'affichage final de la pile.
    ///
    /// Chaque faute est écrite sur `diag` au moment où elle survient, puis le
    /// traitement continue au jeton suivant — une faute n'interrompt jamais
    /// la ligne. Le compteur de position avance de `longueur + 1` pour chaque
    /// jeton accepté, dernier jeton compris (sans séparateur) : règle
    /// héritée, conservée telle quelle ; les jetons fautifs ne le font pas
    /// avancer.
    pub fn calcule_vers<W: Write>(&mut self, ligne: &str, diag: &mut W) -> String {
        let mut position: usize = 0;

        for jeton in ligne.trim().split(' ') {
            if let Some(valeur) = analyse_nombre(jeton) {
                self.pile.push(valeur);
                self.journal_operations.push(Operation::Nombre);
                position += jeton.len() + 1;
                continue;
            }

            let resultat = match Operation::depuis_symbole(jeton) {
                Some(operation) => self.applique(operation, jeton, position),
                None => Err(ErreurCalcul::OperationInvalide(jeton.to_string())),
            };

            match resultat {
                Ok(()) => position += jeton.len() + 1,
                Err(faute) => {
                    debug!("jeton {jeton:?} rejeté : {faute}");
                    let _ = writeln!(diag, "{faute}");
                }
            }
        }

        self.affiche_pile()
    }

    /// « stack: » suivi de chaque opérande formatée, du fond vers le sommet.
    /// Lecture pure : deux appels consécutifs rendent la même chaîne.
    pub fn affiche_pile(&self) -> String {
        let mut sortie = String::from("stack:");
        for valeur in &self.pile {
            sortie.push(' ');
            sortie.push_str(&formate_decimal(valeur));
        }
        sortie
    }

    /* ------------------------ application des opérations ------------------------ */

    fn applique(
        &mut self,
        operation: Operation,
        jeton: &str,
        position: usize,
    ) -> Result<(), ErreurCalcul> {
        match operation {
            Operation::Effacement => {
                self.pile.clear();
                self.journal_valeurs.clear();
                self.journal_operations.clear();
                Ok(())
            }
            Operation::Annulation => {
                self.annule();
                Ok(())
            }
            Operation::Racine => self.applique_racine(jeton, position),
            _ => self.applique_binaire(operation, jeton, position),
        }
    }

    fn applique_racine(&mut self, jeton: &str, position: usize) -> Result<(), ErreurCalcul> {
        // arité vérifiée AVANT toute mutation
        let operande = match self.pile.last() {
            Some(valeur) => valeur.clone(),
            None => {
                return Err(ErreurCalcul::ParametresInsuffisants {
                    symbole: jeton.to_string(),
                    position,
                })
            }
        };

        let resultat = racine(&operande).map_err(|detail| ErreurCalcul::FauteArithmetique {
            symbole: jeton.to_string(),
            position,
            detail,
        })?;

        self.pile.pop();
        self.pile.push(resultat);
        self.journal_valeurs.push(operande);
        self.journal_operations.push(Operation::Racine);
        Ok(())
    }

    fn applique_binaire(
        &mut self,
        operation: Operation,
        jeton: &str,
        position: usize,
    ) -> Result<(), ErreurCalcul> {
        if self.pile.len() < 2 {
            return Err(ErreurCalcul::ParametresInsuffisants {
                symbole: jeton.to_string(),
                position,
            });
        }

        // b au sommet, a dessous ; calcul sur copies, la pile n'est touchée
        // qu'en cas de succès
        let b = self.pile[self.pile.len() - 1].clone();
        let a = self.pile[self.pile.len() - 2].clone();

        let exact = match operation {
            Operation::Addition => &a + &b,
            Operation::Soustraction => &a - &b,
            Operation::Multiplication => &a * &b,
            Operation::Division => {
                if b.is_zero() {
                    return Err(ErreurCalcul::FauteArithmetique {
                        symbole: jeton.to_string(),
                        position,
                        detail: "division by zero".to_string(),
                    });
                }
                &a / &b
            }
            _ => unreachable!("opération non binaire"),
        };

        let resultat = arrondi_significatif(&exact, CHIFFRES_TRAVAIL);
        debug!("{a} {operation:?} {b} -> {resultat}");

        self.pile.truncate(self.pile.len() - 2);
        self.pile.push(resultat);

        // ordre inverse du dépilement : b d'abord, a ensuite
        self.journal_valeurs.push(b);
        self.journal_valeurs.push(a);
        self.journal_operations.push(operation);
        Ok(())
    }

    /// Défait la dernière action ayant modifié la pile.
    ///
    /// Pile vide : aucun effet. Journal d'opérations vide mais pile non
    /// vide : le sommet est dépilé sans restauration — asymétrie héritée,
    /// conservée telle quelle.
    fn annule(&mut self) {
        if self.pile.pop().is_none() {
            return;
        }

        if let Some(marque) = self.journal_operations.pop() {
            match marque {
                Operation::Nombre => {}
                Operation::Racine => {
                    if let Some(valeur) = self.journal_valeurs.pop() {
                        self.pile.push(valeur);
                    }
                }
                _ => {
                    // binaire : les deux opérandes reviennent dans leur ordre d'origine
                    if let Some(valeur) = self.journal_valeurs.pop() {
                        self.pile.push(valeur);
                    }
                    if let Some(valeur) = self.journal_valeurs.pop() {
                        self.pile.push(valeur);
                    }
                }
            }
        }
    }
}
