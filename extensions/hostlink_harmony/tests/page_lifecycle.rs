//! Page lifecycle tests against a fake host window API

use std::ptr::NonNull;
use std::sync::{Arc, Mutex};

use hostlink_core::testing::RecordingEngine;
use hostlink_core::{BridgeConfig, LifecycleState, Orientation, PointerStyle, TransitionOutcome};
use hostlink_harmony::{HarmonySession, HostDispatcher, HostWindowApi, ResourceContext};
use hostlink_platform::{
    CursorImage, DisplayOrientation, HostCallbacks, HostError, Result, ScreenResolution,
    WindowRect,
};

#[derive(Default)]
struct FakeWindowApi {
    window_id: i32,
    grant: bool,
    calls: Mutex<Vec<String>>,
    pointers: Mutex<Vec<(i32, PointerStyle)>>,
    orientations: Mutex<Vec<Orientation>>,
}

impl FakeWindowApi {
    fn with_window(window_id: i32) -> Self {
        Self {
            window_id,
            grant: true,
            ..Default::default()
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HostWindowApi for FakeWindowApi {
    fn last_window_id(&self) -> Result<i32> {
        self.record("last_window_id");
        Ok(self.window_id)
    }

    fn set_title(&self, title: &str) -> Result<()> {
        self.record(&format!("set_title:{}", title));
        Ok(())
    }

    fn set_layout_fullscreen(&self, fullscreen: bool) -> Result<()> {
        self.record(&format!("fullscreen:{}", fullscreen));
        Ok(())
    }

    fn set_preferred_orientation(&self, orientation: Orientation) -> Result<()> {
        self.orientations.lock().unwrap().push(orientation);
        Ok(())
    }

    fn set_pointer_style(&self, window_id: i32, style: PointerStyle) -> Result<()> {
        self.pointers.lock().unwrap().push((window_id, style));
        Ok(())
    }

    fn set_custom_cursor(
        &self,
        window_id: i32,
        image: &CursorImage,
        _hot_x: i32,
        _hot_y: i32,
    ) -> Result<()> {
        self.record(&format!("custom_cursor:{}:{}", window_id, image.width()));
        Ok(())
    }

    fn show_text_input(&self, area: WindowRect) -> Result<()> {
        self.record(&format!(
            "show_text_input:{}:{}:{}:{}",
            area.x, area.y, area.width, area.height
        ));
        Ok(())
    }

    fn hide_text_input(&self) -> Result<()> {
        self.record("hide_text_input");
        Ok(())
    }

    fn request_permission(&self, permission: &str) -> Result<bool> {
        self.record(&format!("permission:{}", permission));
        Ok(self.grant)
    }

    fn resize_window(&self, area: WindowRect) -> Result<()> {
        if area.width <= 0 || area.height <= 0 {
            return Err(HostError::Unsupported("empty window".into()));
        }
        self.record(&format!("resize:{}x{}", area.width, area.height));
        Ok(())
    }

    fn minimize_on_focus_loss(&self) -> Result<()> {
        self.record("minimize");
        Ok(())
    }
}

fn session(api: Arc<FakeWindowApi>) -> (HarmonySession, Arc<RecordingEngine>) {
    let engine = Arc::new(RecordingEngine::default());
    let dispatcher = HostDispatcher::current().expect("tokio runtime");
    let session = HarmonySession::new(engine.clone(), api, dispatcher, &BridgeConfig::default());
    (session, engine)
}

fn resources() -> ResourceContext {
    let manager = NonNull::<u8>::dangling().as_ptr().cast();
    ResourceContext::new("/data/storage/el2/base/cache", manager).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_hide_show_enters_once() {
    let (mut session, engine) = session(Arc::new(FakeWindowApi::with_window(3)));

    assert_eq!(session.page_show(), Some(TransitionOutcome::AwaitingResources));
    assert_eq!(
        session.about_to_appear(&resources(), ScreenResolution::fullscreen(1080, 2340, 3.0, 60.0)),
        Some(TransitionOutcome::Started)
    );
    assert_eq!(session.page_hide(), Some(TransitionOutcome::Paused));
    assert_eq!(session.page_show(), Some(TransitionOutcome::Resumed));
    session.bridge_mut().launcher_mut().join();

    assert!(session.bridge().is_in(LifecycleState::Resumed));
    assert_eq!(engine.count("init"), 1);
    assert_eq!(engine.count("entry"), 1);
    assert_eq!(engine.count("pause"), 1);
    assert_eq!(engine.count("resume"), 1);
    assert_eq!(engine.focus_changes(), vec![true, false, true]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_hide_before_appear_never_pauses() {
    let (mut session, engine) = session(Arc::new(FakeWindowApi::with_window(1)));

    assert_eq!(session.page_hide(), Some(TransitionOutcome::PauseSuppressed));
    session.about_to_appear(&resources(), ScreenResolution::fullscreen(720, 1280, 2.0, 60.0));
    assert!(!session.bridge().has_entered());
    assert_eq!(engine.count("pause"), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pointer_reaches_top_window() {
    let api = Arc::new(FakeWindowApi::with_window(7));
    let (session, _engine) = session(api.clone());
    let callbacks = session.callbacks();

    callbacks.apply_pointer(1).unwrap().await.unwrap();
    callbacks.apply_pointer(11).unwrap().await.unwrap();
    callbacks.apply_pointer(42).unwrap().await.unwrap();

    assert_eq!(
        *api.pointers.lock().unwrap(),
        vec![
            (7, PointerStyle::TextCursor),
            (7, PointerStyle::HandOpen),
            (7, PointerStyle::Default),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_window_id_is_swallowed() {
    let api = Arc::new(FakeWindowApi::with_window(-1));
    let (session, _engine) = session(api.clone());

    session.callbacks().apply_pointer(7).unwrap().await.unwrap();
    assert!(api.pointers.lock().unwrap().is_empty());
    assert_eq!(api.calls(), vec!["last_window_id"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quit_stops_cursor_forwarding() {
    let api = Arc::new(FakeWindowApi::with_window(2));
    let (mut session, engine) = session(api.clone());

    session.about_to_disappear();
    session.about_to_disappear();

    assert!(session.callbacks().apply_pointer(1).is_none());
    let image = CursorImage::new(1, 1, 4, vec![0; 4]).unwrap();
    assert!(session.callbacks().apply_custom_cursor(image, 0, 0).is_none());
    assert!(api.pointers.lock().unwrap().is_empty());
    assert_eq!(engine.count("send_quit"), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_permission_result_reaches_engine() {
    let api = Arc::new(FakeWindowApi::with_window(0));
    let (session, engine) = session(api.clone());

    session
        .callbacks()
        .apply_permission("ohos.permission.MICROPHONE")
        .await
        .unwrap();

    assert_eq!(api.calls(), vec!["permission:ohos.permission.MICROPHONE"]);
    assert_eq!(engine.permission_results(), vec![true]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_orientation_is_resolved_before_forwarding() {
    let api = Arc::new(FakeWindowApi::with_window(0));
    let (session, _engine) = session(api.clone());
    let callbacks = session.callbacks();

    callbacks
        .apply_orientation(800, 480, false, "LandscapeRight")
        .await
        .unwrap();
    callbacks.apply_orientation(480, 800, true, "").await.unwrap();

    assert_eq!(
        *api.orientations.lock().unwrap(),
        vec![Orientation::Landscape, Orientation::AutoRotationPortrait]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_input_is_forwarded_without_transition() {
    let (mut session, engine) = session(Arc::new(FakeWindowApi::with_window(0)));

    session.key_event(0, 2017);
    session.key_event(1, 2017);
    session.text_input(0, "añb");
    session.display_rotation_changed(3);

    assert!(session.bridge().is_in(LifecycleState::Uninitialized));
    assert_eq!(engine.keys(), vec![2017]);
    assert_eq!(engine.key_ups(), vec![2017]);
    assert_eq!(engine.text_inputs(), vec![(3, "añb".to_string())]);
    assert_eq!(engine.orientations(), vec![DisplayOrientation::LandscapeFlipped]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_window_forwarders_reach_host() {
    let api = Arc::new(FakeWindowApi::with_window(4));
    let (session, _engine) = session(api.clone());
    let callbacks = session.callbacks();

    callbacks.apply_title("Game").await.unwrap();
    callbacks.apply_window_style(true).await.unwrap();
    callbacks
        .apply_show_text_input(WindowRect::new(0, 900, 1080, 120))
        .await
        .unwrap();
    callbacks.apply_hide_text_input().await.unwrap();
    callbacks.apply_minimize_on_focus_loss().await.unwrap();
    callbacks
        .apply_window_resize(WindowRect::new(0, 0, 640, 480))
        .await
        .unwrap();
    callbacks
        .apply_window_resize(WindowRect::new(0, 0, 0, 0))
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            "set_title:Game",
            "fullscreen:true",
            "show_text_input:0:900:1080:120",
            "hide_text_input",
            "minimize",
            "resize:640x480",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_custom_cursor_reaches_top_window() {
    let api = Arc::new(FakeWindowApi::with_window(5));
    let (session, _engine) = session(api.clone());

    let image = CursorImage::new(2, 2, 4, vec![0xff; 16]).unwrap();
    session
        .callbacks()
        .apply_custom_cursor(image, 1, 1)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(api.calls(), vec!["last_window_id", "custom_cursor:5:2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_engine_facing_callbacks_are_fire_and_forget() {
    let api = Arc::new(FakeWindowApi::with_window(4));
    let (session, _engine) = session(api.clone());
    let callbacks: &dyn HostCallbacks = &**session.callbacks();

    callbacks.set_title("Detached");
    session.window_stage_created(false);

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while api.calls().len() < 2 && std::time::Instant::now() < deadline {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let calls = api.calls();
    assert!(calls.contains(&"set_title:Detached".to_string()));
    assert!(calls.contains(&"fullscreen:false".to_string()));
}
