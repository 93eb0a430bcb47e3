use eframe::egui::{RichText, ScrollArea, Ui};

use crate::color::STEEL_BLUE;
use crate::data::aggregate::Distributions;
use crate::state::AppState;
use crate::ui::{plot, table};

const TITLE: &str = "Lord of the Rings: A Nerdy Character Explorer";
const NO_RESULTS: &str = "No data available based on the current filters. \
                          It seems the forces of Mordor are obscuring our view.";

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the main area: intro, statistics, filtered table, closing notes.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(filtered) = &state.filtered else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.heading(RichText::new(msg).color(ui.visuals().error_fg_color));
            }
            None => {
                ui.heading("Open a roster to explore  (File → Open…)");
            }
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(TITLE).size(28.0).strong());
            intro(ui);
            ui.add_space(12.0);

            match &state.distributions {
                Distributions::Charts(charts) => {
                    ui.heading("Descriptive Statistics");
                    for dist in charts {
                        ui.group(|ui: &mut Ui| {
                            ui.label(RichText::new(dist.spec.heading).size(18.0).strong());
                            plot::distribution_chart(
                                ui,
                                dist,
                                STEEL_BLUE,
                                state.config.chart_height,
                            );
                        });
                        ui.add_space(8.0);
                    }
                }
                Distributions::NoResults => {
                    ui.colored_label(ui.visuals().warn_fg_color, NO_RESULTS);
                }
            }

            ui.add_space(12.0);
            ui.heading("Filtered DataFrame");
            table::filtered_table(ui, filtered);

            ui.add_space(12.0);
            closing(ui);
        });
}

fn intro(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label("Welcome to ");
        ui.label(RichText::new("Middle-Earth").strong());
        ui.label(
            "'s ultimate character exploration tool! \
             Explore the rich world of J.R.R. Tolkien's legendarium through the lens of data science. \
             Filter through races, realms, and even hairstyles (yes, we have that covered). \
             Let's uncover hidden patterns in the data about your favorite characters.",
        );
    });
}

fn closing(ui: &mut Ui) {
    ui.label(RichText::new("In the darkness bind them.").italics());
    ui.label(
        "This app is brought to you by your friendly neighborhood data wizards. \
         May your journey through Middle-Earth be data-driven and full of discovery.",
    );
}
