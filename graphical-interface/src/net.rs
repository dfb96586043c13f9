use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use backend_driver::{BackendDriver, DriverError};
use route_graph::{Algorithm, Graph, PathResult};

enum NetEvent {
    Graph(u64, Result<Graph, DriverError>),
    Trace(u64, Result<PathResult, DriverError>),
}

/// A response whose generation matched the most recent request of its kind.
pub enum NetResponse {
    Graph(Result<Graph, DriverError>),
    Trace(Result<PathResult, DriverError>),
}

/// Runs backend calls on worker threads and funnels results back over a
/// channel, so the UI thread never blocks on the network.
///
/// Requests are not cancellable once issued; instead every request carries
/// a generation counter and [`poll`](Self::poll) silently drops responses
/// from superseded generations. A slow stale response can therefore never
/// overwrite the result of a newer submission.
pub struct NetClient {
    base_url: String,
    tx: Sender<NetEvent>,
    rx: Receiver<NetEvent>,
    graph_generation: u64,
    trace_generation: u64,
    graph_pending: bool,
    trace_pending: bool,
}

impl NetClient {
    pub fn new(base_url: impl Into<String>) -> NetClient {
        let (tx, rx) = channel();
        Self {
            base_url: base_url.into(),
            tx,
            rx,
            graph_generation: 0,
            trace_generation: 0,
            graph_pending: false,
            trace_pending: false,
        }
    }

    /// Fetches the airway graph in the background.
    pub fn fetch_graph(&mut self) {
        self.graph_generation += 1;
        self.graph_pending = true;
        let generation = self.graph_generation;
        let tx = self.tx.clone();
        let base_url = self.base_url.clone();
        thread::spawn(move || {
            let driver = BackendDriver::new(base_url);
            let _ = tx.send(NetEvent::Graph(generation, driver.fetch_graph()));
        });
    }

    /// Submits a pathfinding request in the background, superseding any
    /// earlier one still in flight.
    pub fn request_path(&mut self, start: String, end: String, algorithm: Algorithm) {
        self.trace_generation += 1;
        self.trace_pending = true;
        let generation = self.trace_generation;
        let tx = self.tx.clone();
        let base_url = self.base_url.clone();
        thread::spawn(move || {
            let driver = BackendDriver::new(base_url);
            let _ = tx.send(NetEvent::Trace(
                generation,
                driver.find_path(&start, &end, algorithm),
            ));
        });
    }

    pub fn graph_pending(&self) -> bool {
        self.graph_pending
    }

    pub fn trace_pending(&self) -> bool {
        self.trace_pending
    }

    /// Drains the channel, returning only responses that belong to the
    /// latest request of their kind.
    pub fn poll(&mut self) -> Vec<NetResponse> {
        let mut responses = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            match event {
                NetEvent::Graph(generation, result) if generation == self.graph_generation => {
                    self.graph_pending = false;
                    responses.push(NetResponse::Graph(result));
                }
                NetEvent::Trace(generation, result) if generation == self.trace_generation => {
                    self.trace_pending = false;
                    responses.push(NetResponse::Trace(result));
                }
                // response from a superseded request
                _ => {}
            }
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_graph() -> Graph {
        Graph::from_json(r#"{"nodes": [], "edges": []}"#).unwrap()
    }

    #[test]
    fn stale_generations_are_dropped() {
        let mut client = NetClient::new("http://unused");
        client.graph_generation = 3;
        client.graph_pending = true;

        client
            .tx
            .send(NetEvent::Graph(2, Ok(empty_graph())))
            .unwrap();
        assert!(client.poll().is_empty());
        assert!(client.graph_pending());

        client
            .tx
            .send(NetEvent::Graph(3, Ok(empty_graph())))
            .unwrap();
        let responses = client.poll();
        assert_eq!(responses.len(), 1);
        assert!(matches!(responses[0], NetResponse::Graph(Ok(_))));
        assert!(!client.graph_pending());
    }

    #[test]
    fn graph_and_trace_generations_are_independent() {
        let mut client = NetClient::new("http://unused");
        client.graph_generation = 1;
        client.trace_generation = 5;

        client
            .tx
            .send(NetEvent::Trace(4, Err(DriverError::Status(500))))
            .unwrap();
        client
            .tx
            .send(NetEvent::Graph(1, Ok(empty_graph())))
            .unwrap();

        let responses = client.poll();
        assert_eq!(responses.len(), 1);
        assert!(matches!(responses[0], NetResponse::Graph(Ok(_))));
    }
}
