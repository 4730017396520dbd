use super::{Container, NetworkRecord, VolumeRecord};

/// Sorts by project type, then project name, then container name.
///
/// Containers of one project end up contiguous, which the menu relies on to
/// emit a single header per project.
pub fn order_containers(containers: &mut [Container]) {
    containers.sort_by(|a, b| {
        a.project
            .cmp(&b.project)
            .then_with(|| a.name().cmp(b.name()))
    });
}

pub fn order_networks(networks: &mut [NetworkRecord]) {
    networks.sort_by(|a, b| a.driver.cmp(&b.driver).then_with(|| a.name.cmp(&b.name)));
}

pub fn order_volumes(volumes: &mut [VolumeRecord]) {
    volumes.sort_by(|a, b| a.driver.cmp(&b.driver).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerRecord, Project, ProjectType, classify};
    use std::collections::HashSet;

    fn container(name: &str, labels: &str) -> Container {
        classify(ContainerRecord {
            id: format!("id-{name}"),
            names: name.to_string(),
            labels: labels.to_string(),
            ..Default::default()
        })
    }

    fn sample() -> Vec<Container> {
        vec![
            container("talos-cp", "talos.cluster.name=lab"),
            container("web-db", "com.docker.compose.project=web"),
            container("zeta", ""),
            container("api-app", "com.docker.compose.project=api"),
            container("coredns", "io.kubernetes.pod.namespace=kube-system"),
            container("alpha", ""),
            container("web-app", "com.docker.compose.project=web"),
            container("minikube", "name.minikube.sigs.k8s.io=minikube"),
            container("tools", "com.github.dockerbar.group=tools"),
        ]
    }

    fn names(containers: &[Container]) -> Vec<&str> {
        containers.iter().map(Container::name).collect()
    }

    #[test]
    fn test_order_by_type_then_project_then_name() {
        let mut containers = sample();
        order_containers(&mut containers);

        assert_eq!(
            names(&containers),
            vec![
                "alpha", "zeta", "tools", "api-app", "web-app", "web-db", "coredns", "minikube",
                "talos-cp",
            ]
        );
    }

    #[test]
    fn test_order_is_idempotent() {
        let mut once = sample();
        order_containers(&mut once);
        let mut twice = once.clone();
        order_containers(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_projects_form_contiguous_runs() {
        let mut containers = sample();
        containers.reverse();
        order_containers(&mut containers);

        let mut seen: HashSet<&Project> = HashSet::new();
        let mut last: Option<&Project> = None;
        for c in &containers {
            if last != Some(&c.project) {
                assert!(seen.insert(&c.project), "{:?} appears twice", c.project);
                last = Some(&c.project);
            }
        }
    }

    #[test]
    fn test_single_before_compose() {
        let mut containers = vec![
            container("a1", "com.docker.compose.project=web"),
            container("a2", ""),
        ];
        order_containers(&mut containers);

        assert_eq!(containers[0].project.kind, ProjectType::Single);
        assert_eq!(names(&containers), vec!["a2", "a1"]);
    }

    #[test]
    fn test_order_networks_and_volumes() {
        let net = |driver: &str, name: &str| NetworkRecord {
            driver: driver.to_string(),
            name: name.to_string(),
            ..Default::default()
        };
        let mut networks = vec![
            net("null", "none"),
            net("bridge", "web_default"),
            net("bridge", "bridge"),
        ];
        order_networks(&mut networks);
        let ordered: Vec<_> = networks.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(ordered, vec!["bridge", "web_default", "none"]);

        let vol = |driver: &str, name: &str| VolumeRecord {
            driver: driver.to_string(),
            name: name.to_string(),
        };
        let mut volumes = vec![vol("nfs", "a"), vol("local", "pgdata"), vol("local", "cache")];
        order_volumes(&mut volumes);
        let ordered: Vec<_> = volumes.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(ordered, vec!["cache", "pgdata", "a"]);
    }
}
