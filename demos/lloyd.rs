use kcluster::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 16, 8, 100);

    // Generate some random data
    let mut samples = vec![0.0f64; sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

    // Calculate kmeans, using kmean++ as initialization-method
    let kclust = KCluster::new(samples, sample_cnt, sample_dims).expect("valid sample shape");
    let result = kclust
        .cluster(k, InitStrategy::KMeansPlusPlus, max_iter, &ClusterConfig::default())
        .expect("valid run parameters");

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
    println!("Converged: {} after {} iterations", result.converged, result.iterations);
}
