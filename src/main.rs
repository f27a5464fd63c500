use scenelab::ViewerApp;

fn main() {
    env_logger::init();
    ViewerApp::new().run();
}
