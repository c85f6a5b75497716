/// Ports Service
/// Contents of the port selector

use crate::models::PortSelection;

#[derive(Debug, Default)]
pub struct PortSelector {
    ports: Vec<String>,
    selected: Option<String>,
}

impl PortSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh: keep showing the last known ports with nothing selected
    pub fn begin_refresh(&mut self) -> PortSelection {
        self.selected = None;
        self.selection()
    }

    /// Replace the list with a fresh enumeration and pre-select its first entry
    pub fn populate(&mut self, ports: Vec<String>) -> PortSelection {
        self.selected = ports.first().cloned();
        self.ports = ports;
        self.selection()
    }

    /// Remember the port the user picked or typed
    pub fn select(&mut self, port: &str) {
        self.selected = (!port.is_empty()).then(|| port.to_string());
    }

    pub fn selection(&self) -> PortSelection {
        PortSelection {
            ports: self.ports.clone(),
            selected: self.selected.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn populate_selects_first_port() {
        let mut selector = PortSelector::new();
        let selection = selector.populate(ports(&["COM3", "COM5"]));

        assert_eq!(selection.ports, ["COM3", "COM5"]);
        assert_eq!(selection.selected.as_deref(), Some("COM3"));
    }

    #[test]
    fn populate_with_nothing_clears_selection() {
        let mut selector = PortSelector::new();
        selector.populate(ports(&["/dev/ttyUSB0"]));

        let selection = selector.populate(Vec::new());
        assert!(selection.ports.is_empty());
        assert_eq!(selection.selected, None);
    }

    #[test]
    fn begin_refresh_keeps_stale_list() {
        let mut selector = PortSelector::new();
        selector.populate(ports(&["COM3"]));

        let selection = selector.begin_refresh();
        assert_eq!(selection.ports, ["COM3"]);
        assert_eq!(selection.selected, None);
    }

    #[test]
    fn select_accepts_ports_outside_the_list() {
        let mut selector = PortSelector::new();
        selector.select("/dev/ttyACM0");
        assert_eq!(selector.selection().selected.as_deref(), Some("/dev/ttyACM0"));

        selector.select("");
        assert_eq!(selector.selection().selected, None);
    }
}
