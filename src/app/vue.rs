// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Le tampon d'expression est affiché en lecture seule : TOUTE
//   modification passe par le composeur du noyau, jeton par jeton
//   (boutons ou touches mappées). Pas d'édition libre du texte.
// - Clavier : chiffres/opérateurs/parenthèses insèrent leur jeton,
//   Enter évalue, Backspace efface le dernier caractère
//   (Escape = bouton "C", géré dans app.rs)

use eframe::egui;

use crate::noyau::jetons::Fonction;
use crate::noyau::{evaluer_expression, format::format_nombre, Jeton, Operateur};

use super::etat::{AppCalc, Demarche};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // Lecture seule : le tampon appartient au composeur.
        Self::champ_monospace(ui, "entree_aff", self.composeur.entree(), 2);

        if self.composeur.est_vide() {
            ui.weak("Ex: (1+2)×3, sin(0.5), pow(2,10)");
        } else if self.composeur.profondeur() > 0 {
            ui.weak(format!(
                "{} parenthèse(s) à fermer",
                self.composeur.profondeur()
            ));
        }

        self.clavier_physique(ui);

        ui.add_space(6.0);

        // Actions + décimales
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l'entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Décimales :");
            let mut d = self.decimales as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=17)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_decimales(d as usize);
            }
        });

        ui.add_space(8.0);

        // Opérateurs + fonctions + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_jeton(ui, "(", Jeton::ParOuvrante);
            self.bouton_jeton(ui, ")", Jeton::ParFermante);

            self.bouton_jeton(ui, "+", Jeton::Operateur(Operateur::Plus));
            self.bouton_jeton(ui, "-", Jeton::Operateur(Operateur::Moins));
            self.bouton_jeton(ui, "×", Jeton::Operateur(Operateur::Fois));
            self.bouton_jeton(ui, "÷", Jeton::Operateur(Operateur::Division));

            ui.separator();

            self.bouton_jeton(ui, "sqrt", Jeton::Fonction(Fonction::Sqrt));
            self.bouton_jeton(ui, "sin", Jeton::Fonction(Fonction::Sin));
            self.bouton_jeton(ui, "cos", Jeton::Fonction(Fonction::Cos));
            self.bouton_jeton(ui, "tan", Jeton::Fonction(Fonction::Tan));
            self.bouton_jeton(ui, "exp", Jeton::Fonction(Fonction::Exp));
            self.bouton_jeton(ui, "ln", Jeton::Fonction(Fonction::Ln));
            self.bouton_jeton(ui, "pow", Jeton::Fonction(Fonction::Pow));

            ui.separator();

            self.bouton_jeton(ui, ",", Jeton::Virgule);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.evaluer_entree();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_sci")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_jeton(ui, "7", Jeton::Chiffre('7'));
                self.bouton_jeton(ui, "8", Jeton::Chiffre('8'));
                self.bouton_jeton(ui, "9", Jeton::Chiffre('9'));
                self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Backspace);
                ui.end_row();

                self.bouton_jeton(ui, "4", Jeton::Chiffre('4'));
                self.bouton_jeton(ui, "5", Jeton::Chiffre('5'));
                self.bouton_jeton(ui, "6", Jeton::Chiffre('6'));
                self.bouton_jeton(ui, "÷", Jeton::Operateur(Operateur::Division));
                ui.end_row();

                self.bouton_jeton(ui, "1", Jeton::Chiffre('1'));
                self.bouton_jeton(ui, "2", Jeton::Chiffre('2'));
                self.bouton_jeton(ui, "3", Jeton::Chiffre('3'));
                self.bouton_jeton(ui, "×", Jeton::Operateur(Operateur::Fois));
                ui.end_row();

                self.bouton_jeton(ui, "0", Jeton::Chiffre('0'));
                self.bouton_jeton(ui, ".", Jeton::Chiffre('.'));
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Clavier physique : chaque frappe est mappée vers son jeton, le
    /// composeur décide de l'accepter. Enter évalue, Backspace efface.
    fn clavier_physique(&mut self, ui: &mut egui::Ui) {
        let events = ui.input(|i| i.events.clone());
        for ev in events {
            if let egui::Event::Text(t) = ev {
                for c in t.chars() {
                    if let Some(j) = jeton_depuis_char(c) {
                        self.composeur.inserer(j);
                    }
                }
            }
        }

        let (enter, backspace) = ui.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
            )
        });
        if enter {
            self.evaluer_entree();
        }
        if backspace {
            self.composeur.effacer_dernier();
        }
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        if self.resultat_dispo {
            Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);
        } else {
            ui.monospace("—");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        // On garde un cadre visuel via Frame + Label monospace.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.composeur.effacer_dernier(),
            }
        }
    }

    fn bouton_jeton(&mut self, ui: &mut egui::Ui, label: &str, jeton: Jeton) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.composeur.inserer(jeton);
        }
    }

    /// Évalue le tampon via le noyau, puis dépose résultat + démarche
    /// dans l'état UI.
    fn evaluer_entree(&mut self) {
        match evaluer_expression(self.composeur.entree()) {
            Ok((valeur, d_noyau)) => {
                let d_ui = Demarche {
                    jetons: d_noyau.jetons,
                    rpn: d_noyau.rpn,
                    arbre: d_noyau.arbre,
                    note: d_noyau.note,
                };
                self.set_resultat(format_nombre(valeur, self.decimales), d_ui);
            }
            Err(e) => {
                self.set_erreur(e.to_string());
            }
        }
    }
}

/// Mappe une frappe clavier vers un jeton de saisie.
/// Les lettres ne sont pas mappées : les fonctions s'insèrent par leurs
/// boutons (qui ouvrent aussi leur appel).
fn jeton_depuis_char(c: char) -> Option<Jeton> {
    match c {
        '0'..='9' | '.' => Some(Jeton::Chiffre(c)),
        '+' => Some(Jeton::Operateur(Operateur::Plus)),
        '-' | '−' => Some(Jeton::Operateur(Operateur::Moins)),
        '*' | '×' => Some(Jeton::Operateur(Operateur::Fois)),
        '/' | '÷' => Some(Jeton::Operateur(Operateur::Division)),
        '(' => Some(Jeton::ParOuvrante),
        ')' => Some(Jeton::ParFermante),
        ',' => Some(Jeton::Virgule),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}
