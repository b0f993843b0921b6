use kcluster::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 16, 8, 2500);

    // Generate some random data
    let mut samples = vec![0.0f64; sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

    let conf = ClusterConfig::build()
        .init_done(&|_| println!("Initialization completed."))
        .iteration_done(&|s, nr, new_distsum|
            println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
                nr, s.distsum, new_distsum, s.distsum - new_distsum))
        .seed(1337)
        .build();

    // Calculate kmeans, using the oversampled k-means|| initialization-method
    let kclust = KCluster::new(samples, sample_cnt, sample_dims).expect("valid sample shape");
    let result = kclust
        .cluster(k, InitStrategy::KMeansParallel, max_iter, &conf)
        .expect("valid run parameters");

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
}
