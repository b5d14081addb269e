use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let info = app
        .deck_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|i| i.clone()));

    let state = info.as_ref().map(|i| i.state).unwrap_or_default();
    let length = info.and_then(|i| i.duration);

    mpris.set_playback(state);
    mpris.set_now_playing(app.current.as_ref().map(|m| m.name.clone()), length);
}
