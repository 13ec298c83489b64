use contracts::domain::a001_catalog_item::aggregate::CatalogItemId;
use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::projections::p900_catalog_table::UploadImageRequest;
use contracts::shared::ajax::CatalogError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::domain::a001_catalog_item::api;
use crate::shared::config::MAX_IMAGE_BYTES;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notices::use_notices;

/// Image cell the dialog uploads into
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTarget {
    pub item_id: CatalogItemId,
    pub column: CatalogColumn,
    pub current_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    /// Request in flight; the transport reports no byte progress
    Uploading,
    Done,
}

impl UploadPhase {
    /// `None` renders the indeterminate bar
    pub fn percent(&self) -> Option<u8> {
        match self {
            UploadPhase::Idle | UploadPhase::Uploading => None,
            UploadPhase::Done => Some(100),
        }
    }
}

/// Only images up to 50 MB are sent
pub fn validate_image(mime: &str, size: f64) -> Result<(), CatalogError> {
    if !mime.starts_with("image/") {
        return Err(CatalogError::validation(
            "Please select an image file (JPG, PNG, GIF or WebP).",
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(CatalogError::validation(
            "The image is too large. The maximum size is 50 MB.",
        ));
    }
    Ok(())
}

fn format_size(bytes: f64) -> String {
    if bytes >= 1024.0 * 1024.0 {
        format!("{:.1} MB", bytes / (1024.0 * 1024.0))
    } else {
        format!("{:.0} KB", (bytes / 1024.0).ceil())
    }
}

#[component]
pub fn ImageUploadDialog(
    catalog_id: u64,
    target: ImageTarget,
    on_close: Callback<()>,
    /// Fired with the stored URL once the backend accepted the file
    on_uploaded: Callback<(CatalogItemId, CatalogColumn, String)>,
) -> impl IntoView {
    let notices = use_notices();
    let file = RwSignal::new_local(None::<web_sys::File>);
    let phase = RwSignal::new(UploadPhase::Idle);
    let drag_over = RwSignal::new(false);
    let ImageTarget {
        item_id,
        column,
        current_url,
    } = target;

    let pick = move |picked: web_sys::File| match validate_image(&picked.type_(), picked.size()) {
        Ok(()) => file.set(Some(picked)),
        Err(e) => notices.report(&e),
    };

    let on_input = move |ev: leptos::ev::Event| {
        let picked = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(f) = picked {
            pick(f);
        }
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        let dropped = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(f) = dropped {
            pick(f);
        }
    };

    let start_upload = move |_| {
        let Some(selected) = file.get_untracked() else {
            notices.report(&CatalogError::validation("Please choose an image first."));
            return;
        };
        phase.set(UploadPhase::Uploading);
        let req = UploadImageRequest {
            catalog_id,
            item_id,
            field: column,
        };
        spawn_local(async move {
            match api::upload_image(&req, &selected).await {
                Ok(url) => {
                    phase.set(UploadPhase::Done);
                    notices.success("Image uploaded.");
                    on_uploaded.run((item_id, column, url));
                    TimeoutFuture::new(600).await;
                    on_close.run(());
                }
                Err(e) => {
                    phase.set(UploadPhase::Idle);
                    notices.report(&e);
                }
            }
        });
    };

    let selected_label = move || {
        file.with(|f| {
            f.as_ref()
                .map(|f| format!("{} ({})", f.name(), format_size(f.size())))
        })
    };

    view! {
        <ModalFrame
            title=format!("Upload image: {}", column.label())
            on_close=on_close
            locked=Signal::derive(move || phase.get() == UploadPhase::Uploading)
            modal_class="image-upload-dialog".to_string()
        >
            {current_url.map(|url| view! {
                <p class="image-upload__current">
                    <img src=url alt="" class="image-upload__thumb" />
                </p>
            })}
            <div
                class=move || if drag_over.get() { "image-upload__drop image-upload__drop--over" } else { "image-upload__drop" }
                on:dragover=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    drag_over.set(true);
                }
                on:dragleave=move |_| drag_over.set(false)
                on:drop=on_drop
            >
                {icon("upload")}
                <p>"Drop an image here or"</p>
                <label class="button">
                    "Browse..."
                    <input type="file" accept="image/*" class="hidden" on:change=on_input />
                </label>
                <p class="description">"Maximum file size: 50 MB."</p>
            </div>
            {move || selected_label().map(|label| view! {
                <p class="image-upload__selected">{icon("image")}" "{label}</p>
            })}
            {move || match phase.get() {
                UploadPhase::Idle => view! { <></> }.into_any(),
                p => {
                    let (class, style) = match p.percent() {
                        Some(v) => ("upload-progress", format!("width: {}%;", v)),
                        None => ("upload-progress upload-progress--indeterminate", String::new()),
                    };
                    view! {
                        <div class=class>
                            <div class="upload-progress__bar" style=style></div>
                        </div>
                    }.into_any()
                }
            }}
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=start_upload
                    disabled=Signal::derive(move || {
                        phase.get() != UploadPhase::Idle || file.with(|f| f.is_none())
                    })
                >
                    {move || if phase.get() == UploadPhase::Uploading { "Uploading..." } else { "Upload" }}
                </Button>
                <Button
                    on_click=move |_| on_close.run(())
                    disabled=Signal::derive(move || phase.get() == UploadPhase::Uploading)
                >
                    "Cancel"
                </Button>
            </Flex>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_images_are_accepted() {
        assert!(validate_image("image/png", 1024.0).is_ok());
        assert!(validate_image("image/webp", MAX_IMAGE_BYTES).is_ok());
        assert!(matches!(
            validate_image("application/pdf", 1024.0),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_size_cap() {
        assert!(matches!(
            validate_image("image/jpeg", MAX_IMAGE_BYTES + 1.0),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_progress_has_no_fake_ramp() {
        assert_eq!(UploadPhase::Uploading.percent(), None);
        assert_eq!(UploadPhase::Done.percent(), Some(100));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(2048.0), "2 KB");
        assert_eq!(format_size(3.5 * 1024.0 * 1024.0), "3.5 MB");
    }
}
