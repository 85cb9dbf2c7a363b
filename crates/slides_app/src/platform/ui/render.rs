use html_escape::{encode_double_quoted_attribute, encode_text};
use slides_core::{AppViewModel, PreviewView, ResultView};

use super::constants::*;
use super::surface::UiCommand;

pub fn render(view: &AppViewModel) -> Vec<UiCommand> {
    let mut cmds = vec![
        UiCommand::SetControlEnabled {
            control_id: BUTTON_GENERATE,
            enabled: view.trigger_enabled,
        },
        UiCommand::SetInnerMarkup {
            control_id: REGION_LOADING,
            markup: format!("<p>{LOADING_TEXT}</p>\n"),
        },
        UiCommand::SetVisible {
            control_id: REGION_LOADING,
            visible: view.loading_visible,
        },
        UiCommand::SetDisclosure {
            control_id: REGION_DETAILS,
            summary: DETAILS_SUMMARY,
        },
    ];

    match &view.result {
        None => cmds.push(UiCommand::SetVisible {
            control_id: REGION_RESULT,
            visible: false,
        }),
        Some(result) => {
            let class_name = match result {
                ResultView::Success { .. } => CLASS_RESULT_SUCCESS,
                ResultView::Failure { .. } => CLASS_RESULT_ERROR,
            };
            cmds.push(UiCommand::SetClassName {
                control_id: REGION_RESULT,
                class_name,
            });
            cmds.push(UiCommand::SetInnerMarkup {
                control_id: REGION_RESULT,
                markup: result_markup(result),
            });
            cmds.push(UiCommand::SetVisible {
                control_id: REGION_RESULT,
                visible: true,
            });
        }
    }

    match view.result.as_ref().and_then(failure_details) {
        Some(details) => {
            cmds.push(UiCommand::SetInnerMarkup {
                control_id: REGION_DETAILS,
                markup: details_markup(details),
            });
            cmds.push(UiCommand::SetVisible {
                control_id: REGION_DETAILS,
                visible: true,
            });
        }
        None => cmds.push(UiCommand::SetVisible {
            control_id: REGION_DETAILS,
            visible: false,
        }),
    }

    cmds.push(UiCommand::SetInnerMarkup {
        control_id: REGION_PREVIEW,
        markup: preview_markup(&view.preview),
    });

    cmds
}

pub fn result_markup(result: &ResultView) -> String {
    match result {
        ResultView::Success { download_target } => format!(
            "<h3>Presentation generated successfully!</h3>\n\
             <p>Your file is ready for download.</p>\n\
             <a href=\"{href}\" class=\"btn-download\">Download presentation (HTML)</a>\n",
            href = encode_double_quoted_attribute(download_target)
        ),
        ResultView::Failure { message, .. } => format!(
            "<h3>Error generating presentation</h3>\n<p>{}</p>\n",
            encode_text(message)
        ),
    }
}

fn failure_details(result: &ResultView) -> Option<&str> {
    match result {
        ResultView::Failure {
            details: Some(details),
            ..
        } => Some(details.as_str()),
        _ => None,
    }
}

/// Collapsed disclosure: no `open` attribute.
pub fn details_markup(details: &str) -> String {
    format!(
        "<details class=\"error-details\">\
         <summary>{DETAILS_SUMMARY}</summary>\
         <pre>{}</pre></details>\n",
        encode_text(details)
    )
}

/// Empty string for an empty selection: the region is cleared, header included.
pub fn preview_markup(preview: &PreviewView) -> String {
    let mut markup = String::new();
    if let Some(header) = preview.header {
        markup.push_str(&format!("<strong>{}</strong><br>\n", encode_text(header)));
    }
    for entry in &preview.entries {
        markup.push_str(&format!(
            "<div class=\"preview-item\">{} <br><code>{}</code></div>\n",
            encode_text(&entry.file_name),
            encode_text(&entry.reference)
        ));
    }
    markup
}
